use crate::ecl::EclType;
use crate::error::RestartError;

/// Values of one keyword, widened into owned Rust types.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordData {
    Inte(Vec<i32>),
    Real(Vec<f32>),
    Doub(Vec<f64>),
    Logi(Vec<bool>),
    Char { width: u8, values: Vec<String> },
    Mess,
}

impl KeywordData {
    pub fn ecl_type(&self) -> EclType {
        match self {
            KeywordData::Inte(_) => EclType::Inte,
            KeywordData::Real(_) => EclType::Real,
            KeywordData::Doub(_) => EclType::Doub,
            KeywordData::Logi(_) => EclType::Logi,
            KeywordData::Char { width: 8, .. } => EclType::Char,
            KeywordData::Char { width, .. } => EclType::C0nn(*width),
            KeywordData::Mess => EclType::Mess,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            KeywordData::Inte(v) => v.len(),
            KeywordData::Real(v) => v.len(),
            KeywordData::Doub(v) => v.len(),
            KeywordData::Logi(v) => v.len(),
            KeywordData::Char { values, .. } => values.len(),
            KeywordData::Mess => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read access to the keywords of one report-step block.
///
/// Lookups see only the first keyword of a given name.
pub trait KeywordSource {
    fn contains(&self, name: &str) -> bool;

    fn first(&mut self, name: &str) -> Result<Option<KeywordData>, RestartError>;
}

/// Keywords held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemContainer {
    keywords: Vec<(String, KeywordData)>,
}

impl MemContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, data: KeywordData) -> Self {
        self.push(name, data);
        self
    }

    pub fn push(&mut self, name: &str, data: KeywordData) {
        self.keywords.push((name.to_string(), data));
    }
}

impl KeywordSource for MemContainer {
    fn contains(&self, name: &str) -> bool {
        self.keywords.iter().any(|(n, _)| n == name)
    }

    fn first(&mut self, name: &str) -> Result<Option<KeywordData>, RestartError> {
        Ok(self
            .keywords
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.clone()))
    }
}
