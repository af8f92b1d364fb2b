/// External collaborator that produces the interview questions for the
/// generation flow. The real deployment plugs a text-generation model in
/// behind this seam; the bundled implementation is template-based so the
/// server works without one.
#[cfg_attr(test, mockall::automock)]
pub trait QuestionGenerator: Send + Sync + 'static {
    fn generate(&self, interview_type: &str, audience: &str) -> Result<Vec<String>, String>;
}

#[derive(Debug, Clone, Default)]
pub struct TemplateQuestions;

impl QuestionGenerator for TemplateQuestions {
    fn generate(&self, interview_type: &str, audience: &str) -> Result<Vec<String>, String> {
        Ok(vec![
            format!("How would you open a {interview_type} session for {audience}?"),
            format!("What is the core message you want {audience} to remember?"),
            format!(
                "Which part of your {interview_type} material are you least confident about, and why?"
            ),
            format!("How do you plan to handle questions from {audience}?"),
            format!("What would you change if you had half the time for the {interview_type}?"),
        ])
    }
}
