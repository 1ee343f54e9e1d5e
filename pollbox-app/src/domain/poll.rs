use pollbox_errors::AppError;
use serde::{Deserialize, Serialize};

const MAX_TITLE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 500;
const MAX_QUESTION_LENGTH: usize = 500;
const MAX_OPTION_LENGTH: usize = 200;
const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 10;

const DEFAULT_TITLE: &str = "Untitled Poll";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub question: String,
    pub user_id: uuid::Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub id: uuid::Uuid,
    pub poll_id: uuid::Uuid,
    pub text: String,
    pub position: i32,
}

/// Poll-creation input after validation. Construct via [`NewPoll::validate`];
/// the fields are already trimmed and bounds-checked.
#[derive(Debug, Clone)]
pub struct NewPoll {
    pub title: String,
    pub description: Option<String>,
    pub question: String,
    pub options: Vec<String>,
}

impl NewPoll {
    pub fn validate(
        title: Option<&str>,
        description: Option<&str>,
        question: &str,
        options: &[String],
    ) -> Result<Self, AppError> {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => {
                if t.len() > MAX_TITLE_LENGTH {
                    return Err(AppError::validation(format!(
                        "Title must be at most {MAX_TITLE_LENGTH} characters"
                    )));
                }
                t.to_string()
            }
            _ => DEFAULT_TITLE.to_string(),
        };

        let description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => {
                if d.len() > MAX_DESCRIPTION_LENGTH {
                    return Err(AppError::validation(format!(
                        "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
                    )));
                }
                Some(d.to_string())
            }
            _ => None,
        };

        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::validation("Question is required"));
        }
        if question.len() > MAX_QUESTION_LENGTH {
            return Err(AppError::validation(format!(
                "Question must be at most {MAX_QUESTION_LENGTH} characters"
            )));
        }

        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(AppError::validation(format!(
                "A poll needs between {MIN_OPTIONS} and {MAX_OPTIONS} options, got {}",
                options.len()
            )));
        }

        let mut cleaned = Vec::with_capacity(options.len());
        let mut seen = Vec::with_capacity(options.len());
        for option in options {
            let option = option.trim();
            if option.is_empty() {
                return Err(AppError::validation("Options cannot be empty"));
            }
            if option.len() > MAX_OPTION_LENGTH {
                return Err(AppError::validation(format!(
                    "Options must be at most {MAX_OPTION_LENGTH} characters"
                )));
            }
            let lower = option.to_lowercase();
            if seen.contains(&lower) {
                return Err(AppError::validation(format!(
                    "Duplicate option: {option}"
                )));
            }
            seen.push(lower);
            cleaned.push(option.to_string());
        }

        Ok(Self {
            title,
            description,
            question: question.to_string(),
            options: cleaned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_minimal_input() {
        let poll = NewPoll::validate(None, None, "Tabs or spaces?", &opts(&["Tabs", "Spaces"]))
            .unwrap();
        assert_eq!(poll.title, "Untitled Poll");
        assert_eq!(poll.description, None);
        assert_eq!(poll.options, vec!["Tabs", "Spaces"]);
    }

    #[test]
    fn trims_and_keeps_explicit_fields() {
        let poll = NewPoll::validate(
            Some("  Editor wars  "),
            Some("  the eternal question  "),
            "  Vim or Emacs?  ",
            &opts(&[" Vim ", " Emacs "]),
        )
        .unwrap();
        assert_eq!(poll.title, "Editor wars");
        assert_eq!(poll.description.as_deref(), Some("the eternal question"));
        assert_eq!(poll.question, "Vim or Emacs?");
        assert_eq!(poll.options, vec!["Vim", "Emacs"]);
    }

    #[test]
    fn rejects_empty_question() {
        assert!(NewPoll::validate(None, None, "   ", &opts(&["a", "b"])).is_err());
    }

    #[test]
    fn rejects_too_few_or_too_many_options() {
        assert!(NewPoll::validate(None, None, "q", &opts(&["only one"])).is_err());
        let eleven: Vec<String> = (0..11).map(|i| format!("option {i}")).collect();
        assert!(NewPoll::validate(None, None, "q", &eleven).is_err());
    }

    #[test]
    fn rejects_empty_and_duplicate_options() {
        assert!(NewPoll::validate(None, None, "q", &opts(&["a", "  "])).is_err());
        assert!(NewPoll::validate(None, None, "q", &opts(&["Yes", "yes"])).is_err());
    }

    #[test]
    fn rejects_overlong_fields() {
        let long_question = "x".repeat(501);
        assert!(NewPoll::validate(None, None, &long_question, &opts(&["a", "b"])).is_err());

        let long_title = "t".repeat(201);
        assert!(
            NewPoll::validate(Some(long_title.as_str()), None, "q", &opts(&["a", "b"])).is_err()
        );

        let long_option = "o".repeat(201);
        assert!(NewPoll::validate(None, None, "q", &opts(&["a", long_option.as_str()])).is_err());
    }
}
