use exercise_extractor_libs::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{borrow::Cow, fmt, str::FromStr};

static PUBLIC_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"public\s+class\s+(\w+)").unwrap());
static CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+(\w+)").unwrap());
static RUBY_METHOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdef\s+(\w+)").unwrap());
static JS_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:var|let|const)\s+(\w+)\s*=\s*(?:async\s+)?function").unwrap());
static GO_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunc\s+(\w+)").unwrap());
static C_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[A-Za-z_][\w\s\*]*?\b(\w+)\s*\(").unwrap());
static SLASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").unwrap());
static HASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[^\n]*").unwrap());

/// Languages accepted by the exporter. Anything else the service reports is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
    Java,
    Python,
    C,
    CSharp,
    JavaScript,
    Ruby,
    Swift,
    Golang,
}

const LANGUAGE_CODES: [(Language, &str); 9] = [
    (Language::Cpp, "CPP"),
    (Language::Java, "JAVA"),
    (Language::Python, "PYTHON"),
    (Language::C, "C"),
    (Language::CSharp, "CSHARP"),
    (Language::JavaScript, "JAVASCRIPT"),
    (Language::Ruby, "RUBY"),
    (Language::Swift, "SWIFT"),
    (Language::Golang, "GOLANG"),
];

impl Language {
    pub fn code(&self) -> &'static str {
        LANGUAGE_CODES
            .iter()
            .find(|(language, _)| language == self)
            .map(|(_, code)| *code)
            .unwrap_or_default()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Python => "py",
            Language::C => "c",
            Language::CSharp => "cs",
            Language::JavaScript => "js",
            Language::Ruby => "rb",
            Language::Swift => "swift",
            Language::Golang => "go",
        }
    }

    /// Name of the class or function a solution is submitted as, used for its file name.
    ///
    /// Comments are skipped, the templates of the service declare helper types in them.
    pub fn entry_point(&self, solution: &str) -> Option<String> {
        let pattern: &Regex = match self {
            Language::Java | Language::CSharp => &*PUBLIC_CLASS,
            Language::Cpp | Language::Python | Language::Swift => &*CLASS,
            Language::Ruby => &*RUBY_METHOD,
            Language::JavaScript => &*JS_FUNCTION,
            Language::Golang => &*GO_FUNCTION,
            Language::C => &*C_FUNCTION,
        };

        let code = self.strip_comments(solution);
        pattern
            .captures(&code)
            .and_then(|captures| captures.get(1))
            .map(|name| name.as_str().to_string())
    }

    fn strip_comments<'a>(&self, solution: &'a str) -> Cow<'a, str> {
        match self {
            Language::Python | Language::Ruby => HASH_COMMENT.replace_all(solution, ""),
            _ => SLASH_COMMENT.replace_all(solution, ""),
        }
    }
}

impl FromStr for Language {
    type Err = ExtractError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let upper = code.to_uppercase();
        LANGUAGE_CODES
            .iter()
            .find(|(_, known)| *known == upper)
            .map(|(language, _)| *language)
            .ok_or_else(|| ExtractError::UnknownLanguage(code.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code().to_lowercase())
    }
}
