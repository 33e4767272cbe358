/*!
 * Translation of source text through AI providers.
 *
 * - `client`: single-text translation with retries, cache and fall-back
 * - `coordinator`: concurrent translation of every candidate node of a file
 * - `cache`: per-run memo of translated texts
 */

pub use self::client::{RunOptions, TranslationContext, Translator};
pub use self::coordinator::{NodeReport, apply_translations};

pub mod cache;
pub mod client;
pub mod coordinator;
