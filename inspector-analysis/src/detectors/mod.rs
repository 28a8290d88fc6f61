//! Per-pattern orchestrators.
//!
//! Each analyzer subscribes to declaration kinds, binds the matching check
//! for each occurrence, runs it through a [`PatternDispatcher`], and
//! reports the result. Nothing is kept between invocations.

pub mod decorator;
pub mod factory_method;
pub mod flyweight;
pub mod registry;
pub mod singleton;
pub mod traits;

pub use decorator::DecoratorAnalyzer;
pub use factory_method::FactoryMethodAnalyzer;
pub use flyweight::FlyweightAnalyzer;
pub use registry::DetectorRegistry;
pub use singleton::SingletonAnalyzer;
pub use traits::PatternAnalyzer;

use crate::engine::context::NodeContext;
use crate::patterns::{Check, PatternCheck, PatternDispatcher};

/// Runs one stand-alone check and reports it when it matches.
fn report_check<'a>(context: &NodeContext<'a>, check: impl Into<PatternCheck<'a>>, subject: &str) {
    let check = check.into();
    let (pattern, name) = (check.pattern(), check.name());
    let mut dispatcher = PatternDispatcher::new();
    dispatcher.bind(check);
    if !dispatcher.run(context.view) {
        if let Some(result) = dispatcher.last_result().filter(|result| result.is_unsupported()) {
            tracing::trace!(check = name, subject, verdict = ?result.verdict, "check unsupported");
        }
        return;
    }
    if let Some(location) = dispatcher.location() {
        context.report(
            pattern,
            name,
            subject,
            location.clone(),
            dispatcher.evidence().map(str::to_string),
        );
    }
}
