//! Generic utility primitives with zero domain knowledge.
//!
//! - `powershell` - PowerShell escaping and quoting
//! - `template` - String template rendering

pub mod powershell;
pub mod template;
