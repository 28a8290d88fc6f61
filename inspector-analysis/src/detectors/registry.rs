//! The set of analyzers a pass runs.

use inspector_core::config::PatternConfig;
use inspector_core::errors::DetectionError;

use super::decorator::DecoratorAnalyzer;
use super::factory_method::FactoryMethodAnalyzer;
use super::flyweight::FlyweightAnalyzer;
use super::singleton::SingletonAnalyzer;
use super::traits::PatternAnalyzer;
use crate::patterns::DesignPattern;

pub struct DetectorRegistry {
    analyzers: Vec<Box<dyn PatternAnalyzer>>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// All four pattern analyzers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SingletonAnalyzer));
        registry.register(Box::new(FactoryMethodAnalyzer));
        registry.register(Box::new(DecoratorAnalyzer));
        registry.register(Box::new(FlyweightAnalyzer));
        registry
    }

    /// Default analyzers narrowed to the patterns enabled in `config`.
    pub fn from_config(config: &PatternConfig) -> Result<Self, DetectionError> {
        let mut enabled = Vec::new();
        for name in config.effective_enabled() {
            let pattern =
                DesignPattern::from_name(&name).ok_or_else(|| DetectionError::UnknownPattern(name.clone()))?;
            enabled.push(pattern);
        }
        let mut registry = Self::with_defaults();
        registry.retain(|pattern| enabled.contains(&pattern));
        if registry.is_empty() {
            return Err(DetectionError::NoAnalyzersEnabled);
        }
        Ok(registry)
    }

    /// Adds an analyzer, replacing any registered for the same pattern.
    pub fn register(&mut self, analyzer: Box<dyn PatternAnalyzer>) {
        let pattern = analyzer.pattern();
        self.analyzers.retain(|existing| existing.pattern() != pattern);
        self.analyzers.push(analyzer);
    }

    pub fn retain(&mut self, mut keep: impl FnMut(DesignPattern) -> bool) {
        self.analyzers.retain(|analyzer| keep(analyzer.pattern()));
    }

    pub fn patterns(&self) -> Vec<DesignPattern> {
        self.analyzers.iter().map(|analyzer| analyzer.pattern()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PatternAnalyzer> {
        self.analyzers.iter().map(|analyzer| &**analyzer)
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_pattern() {
        assert_eq!(DetectorRegistry::with_defaults().patterns(), DesignPattern::ALL.to_vec());
    }

    #[test]
    fn config_narrows_the_set() {
        let config = PatternConfig {
            enabled: vec!["Singleton".to_string(), "flyweight".to_string()],
            ..Default::default()
        };
        let registry = DetectorRegistry::from_config(&config).unwrap();
        assert_eq!(
            registry.patterns(),
            vec![DesignPattern::Singleton, DesignPattern::Flyweight]
        );
    }

    #[test]
    fn unknown_pattern_is_rejected() {
        let config = PatternConfig {
            enabled: vec!["observer".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            DetectorRegistry::from_config(&config),
            Err(DetectionError::UnknownPattern(name)) if name == "observer"
        ));
    }
}
