pub const MAX_INPUT_LEN: usize = 10;

/// The answer being typed on the number pad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerInput {
    text: String,
}

impl AnswerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() || self.text.len() >= MAX_INPUT_LEN {
            return;
        }
        self.text.push(digit);
    }

    pub fn push_decimal_point(&mut self) {
        if self.text.contains('.') || self.text.len() >= MAX_INPUT_LEN {
            return;
        }
        self.text.push('.');
    }

    /// Removes a leading minus, or adds one to an empty input. A minus can
    /// never land in the middle of a number.
    pub fn toggle_sign(&mut self) {
        if let Some(rest) = self.text.strip_prefix('-') {
            self.text = rest.to_string();
        } else if self.text.is_empty() {
            self.text.push('-');
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Numeric value of the input. Anything that is not a number yet
    /// (empty, a lone `-` or `.`) counts as 0.
    pub fn value(&self) -> f64 {
        self.text.parse().unwrap_or(0.0)
    }
}
