pub mod history;
pub mod submissions;
