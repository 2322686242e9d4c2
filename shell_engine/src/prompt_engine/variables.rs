// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use futures_util::future::join_all;

use super::PromptValue;
use crate::EngineLogger;

/// One well formed `${name}` placeholder. `start..end` covers the whole placeholder
/// (byte offsets into the template), `name` is the text between the braces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableSpan {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Normal,
    DollarSeen { start: usize },
    BraceOpen { start: usize },
}

/// Collect every `${name}` span, left to right.
///
/// - The name is everything up to the next `}`, so `${}` is a span with an empty name.
/// - Scanning resumes right after each `}`, so `${a}${b}` yields two spans.
/// - `$$` restarts the placeholder at the second `$`.
/// - An unterminated `${` at the end yields no span.
#[must_use]
pub fn scan_variable_spans(template: &str) -> Vec<VariableSpan> {
    let mut spans = vec![];
    let mut state = ScanState::Normal;

    for (index, ch) in template.char_indices() {
        state = match (state, ch) {
            (ScanState::Normal | ScanState::DollarSeen { .. }, '$') => {
                ScanState::DollarSeen { start: index }
            }
            (ScanState::Normal, _) => ScanState::Normal,
            (ScanState::DollarSeen { start }, '{') => ScanState::BraceOpen { start },
            (ScanState::DollarSeen { .. }, _) => ScanState::Normal,
            (ScanState::BraceOpen { start }, '}') => {
                spans.push(VariableSpan {
                    name: template[start + 2..index].to_string(),
                    start,
                    end: index + 1,
                });
                ScanState::Normal
            }
            (brace_open @ ScanState::BraceOpen { .. }, _) => brace_open,
        };
    }

    spans
}

/// Replace every `${name}` placeholder in `template` with the value bound to `name`.
///
/// All bindings are resolved concurrently, then substituted right to left so the
/// offsets of earlier spans stay valid. A placeholder whose name is unbound, or whose
/// async producer fails, is logged and left in place as literal text.
pub async fn resolve_prompt_variables(
    template: &str,
    variables: &HashMap<String, PromptValue>,
    logger: &EngineLogger,
) -> String {
    let spans = scan_variable_spans(template);
    if spans.is_empty() {
        return template.to_string();
    }

    let pending = spans.iter().map(|span| {
        let maybe_value = variables.get(&span.name).cloned();
        async move {
            match maybe_value {
                Some(value) => Some(value.resolve().await),
                None => None,
            }
        }
    });
    let results = join_all(pending).await;

    let mut resolved = template.to_string();
    for (span, result) in spans.iter().zip(results).rev() {
        match result {
            Some(Ok(text)) => resolved.replace_range(span.start..span.end, &text),
            Some(Err(report)) => logger.scope(|| {
                tracing::warn!(
                    variable = %span.name,
                    error = %report,
                    "Prompt variable producer failed"
                );
            }),
            None => logger.scope(|| {
                tracing::warn!(variable = %span.name, "Could not resolve prompt variable");
            }),
        }
    }

    resolved
}
