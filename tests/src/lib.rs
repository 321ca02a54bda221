//! Integration tests for the manual host addition workflow.

mod workflow;
