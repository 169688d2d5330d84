use crate::report::model::UNKNOWN_MODULE;

/// Assigns a module from the first log message that names one of the
/// configured keywords.
#[derive(Debug, Clone)]
pub struct ModuleClassifier {
    keywords: Vec<String>,
}

impl ModuleClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn classify(&self, messages: &[String]) -> String {
        messages
            .iter()
            .find_map(|message| self.keyword_of(message))
            .map(str::to_owned)
            .unwrap_or_else(|| UNKNOWN_MODULE.to_owned())
    }

    fn keyword_of(&self, message: &str) -> Option<&str> {
        let message = message.trim();
        self.keywords
            .iter()
            .find(|keyword| keyword.eq_ignore_ascii_case(message))
            .map(String::as_str)
    }
}
