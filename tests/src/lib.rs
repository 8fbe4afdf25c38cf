//! Cross-crate tests for the exposr pipeline.

#[cfg(test)]
mod pipeline;
#[cfg(test)]
mod support;
