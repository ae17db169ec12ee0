use crate::types::{Language, Submission};
use chrono::SecondsFormat;
use exercise_extractor_libs::{
    shell::{self, ShellCommand},
    ExtractError, Result,
};
use itertools::Itertools;

const DESCRIPTION_WIDTH: usize = 100;
const REPOSITORY_NAME: &str = "LeetCodeSolutions";
const SCAFFOLD: &str = "gradle init --type java-library --test-framework spock && rm src/test/groovy/LibraryTest.groovy && rm src/main/java/Library.java && git add -A && gradle build";

/// Turns resolved submissions into a script that replays them as a git history.
///
/// The generator trusts the order it is given and commits in that order.
pub struct HistoryGenerator {
    account: String,
}

impl HistoryGenerator {
    pub fn new(account: &str) -> Self {
        Self {
            account: account.to_string(),
        }
    }

    /// Local part of the account, used as the CI user name.
    pub fn user_name(&self) -> &str {
        self.account.split('@').next().unwrap_or_default()
    }

    pub fn commands(&self, submissions: &[Submission]) -> Result<Vec<ShellCommand>> {
        let mut commands = vec![ShellCommand::InitRepository];

        for submission in submissions {
            commands.extend(self.commit(submission)?);
        }
        commands.extend(self.epilogue(submissions));

        Ok(commands)
    }

    pub fn generate(&self, submissions: &[Submission]) -> Result<String> {
        let commands = self.commands(submissions)?;
        tracing::info!(
            "{} commands generated for {} problems.",
            commands.len(),
            submissions.len()
        );
        Ok(shell::render(&commands))
    }

    fn commit(&self, submission: &Submission) -> Result<Vec<ShellCommand>> {
        let entry_point = submission
            .language
            .entry_point(&submission.solution)
            .ok_or_else(|| {
                ExtractError::NotFound(format!(
                    "entry point name in the {} solution of {:?}",
                    submission.language, submission.name
                ))
            })?;
        let directory = format!(
            "src/main/{}/leetcode/{}",
            submission.language, submission.package_name
        );
        let path = format!(
            "{}/{}.{}",
            directory,
            entry_point,
            submission.language.extension()
        );

        Ok(vec![
            ShellCommand::MakeDirectory(directory),
            ShellCommand::WriteFile {
                path,
                content: source_file(submission),
            },
            ShellCommand::Stage(String::from("src")),
            ShellCommand::Commit {
                message: submission.name.clone(),
                date: submission
                    .submit_time
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        ])
    }

    fn epilogue(&self, submissions: &[Submission]) -> Vec<ShellCommand> {
        let languages: Vec<Language> = submissions
            .iter()
            .map(|submission| submission.language)
            .unique()
            .collect();
        let user = self.user_name();

        let blurb = if languages.is_empty() {
            String::from("Solutions to my [LeetCode](https://leetcode.com) exercises, exported by exercise_extractor.")
        } else {
            format!(
                "Solutions to my [LeetCode](https://leetcode.com) exercises in {}, exported by exercise_extractor.",
                languages.iter().join(", ")
            )
        };
        let readme = format!(
            "[![Build Status](https://travis-ci.org/{user}/{repo}.png)](https://travis-ci.org/{user}/{repo})\n\n{blurb}",
            user = user,
            repo = REPOSITORY_NAME,
            blurb = blurb,
        );
        let travis_languages = if languages.is_empty() {
            Language::Java.to_string()
        } else {
            languages.iter().join(",")
        };
        let travis = format!(
            "language: {}\n\njdk: oraclejdk8\n\nbefore_install: chmod +x gradlew\nscript: ./gradlew clean build --stacktrace",
            travis_languages
        );

        vec![
            ShellCommand::Echo(String::from(
                "to install gradle, type: sudo add-apt-repository ppa:cwchien/gradle && sudo apt-get update && sudo apt-get install gradle",
            )),
            ShellCommand::WriteFile {
                path: String::from("README.md"),
                content: readme,
            },
            ShellCommand::WriteFile {
                path: String::from(".travis.yml"),
                content: travis,
            },
            ShellCommand::Raw(String::from(SCAFFOLD)),
        ]
    }
}

/// Solution source preceded by the problem description as a comment.
///
/// Java files also get the package of their directory and the usual imports.
fn source_file(submission: &Submission) -> String {
    let mut comment: Vec<String> = submission
        .description
        .lines()
        .flat_map(|line| wrap(line.trim(), DESCRIPTION_WIDTH))
        .collect();
    comment.push(format!("Source: {}", submission.link));

    let comment = match submission.language {
        Language::Python | Language::Ruby => comment
            .iter()
            .map(|line| if line.is_empty() { String::from("#") } else { format!("# {}", line) })
            .join("\n"),
        _ => format!(
            "/**\n{}\n */",
            comment
                .iter()
                .map(|line| if line.is_empty() { String::from(" *") } else { format!(" * {}", line) })
                .join("\n")
        ),
    };
    let header = match submission.language {
        Language::Java => format!(
            "package leetcode.{};\n\nimport java.util.*;\n\n",
            submission.package_name
        ),
        _ => String::new(),
    };

    format!("{}{}\n{}", header, comment, submission.solution.trim_end())
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);

    lines
}
