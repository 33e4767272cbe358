/*!
 * # jasweep
 *
 * A Rust library for translating Japanese text embedded in TypeScript and
 * JavaScript sources into English using AI.
 *
 * ## Features
 *
 * - Finds Japanese text in string literals, JSX text and comments
 * - Translates it using various AI providers:
 *   - OpenAI API (and OpenAI-compatible servers such as LM Studio)
 *   - Anthropic API
 *   - Ollama (local LLM)
 * - Rewrites only the translated nodes and keeps every other byte of the file
 * - Falls back to the original text whenever a translation fails
 * - Dry-run mode that reports candidates without calling a provider
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script_detector`: Japanese script detection
 * - `syntax`: Parsing, node discovery and printing:
 *   - `syntax::classifier`: Lazy discovery of translation-target nodes
 *   - `syntax::nodes`: Literal, text-run and comment nodes
 *   - `syntax::tree`: Parsed file with recorded replacements
 * - `translation`: AI-powered translation:
 *   - `translation::client`: Single-text translation with fall-back
 *   - `translation::coordinator`: Concurrent translation of a file's nodes
 *   - `translation::cache`: Per-run translation cache
 * - `pipeline`: Parse, translate and print one file
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for various LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod pipeline;
pub mod providers;
pub mod script_detector;
pub mod syntax;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ProviderError, SyntaxError};
pub use pipeline::{FileOutcome, FilePipeline, PipelineState};
pub use script_detector::contains_target_script;
pub use translation::{NodeReport, RunOptions, Translator};
