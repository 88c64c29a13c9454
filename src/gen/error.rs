use std::error::Error;

use parse_display::Display;

use crate::bbcpu::AddrMode;

// ------------------------------------------------------------------------------------------------
// GenErrorKind
// ------------------------------------------------------------------------------------------------

/// The kinds of generation errors.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
pub enum GenErrorKind {
	/// The mnemonic isn't in any family. The descriptor gets skipped.
	#[display("unknown instruction type '{mnemonic}'")]
	UnknownMnemonic { mnemonic: String },

	/// The family needs more arguments than the descriptor lists.
	#[display("expected an argument at position {index}, but only {got} given")]
	MissingOperand { index: usize, got: usize },

	/// The descriptor's addressing mode makes no sense for its mnemonic.
	#[display("{mnemonic} instructions have no '{mode}' form")]
	UnsupportedMode { mnemonic: String, mode: AddrMode },
}

// ------------------------------------------------------------------------------------------------
// GenError
// ------------------------------------------------------------------------------------------------

/// The generation error type.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
#[display("instruction '{name}': {kind}")]
pub struct GenError {
	/// Name of the offending descriptor.
	pub name: String,
	/// kind of error.
	pub kind: GenErrorKind,
}

impl Error for GenError {}

impl GenError {
	/// Shorthand constructors.
	pub fn unknown_mnemonic(name: &str, mnemonic: &str) -> GenError {
		GenError { name: name.into(), kind: GenErrorKind::UnknownMnemonic { mnemonic: mnemonic.into() } }
	}

	/// Ditto.
	pub fn missing_operand(name: &str, index: usize, got: usize) -> GenError {
		GenError { name: name.into(), kind: GenErrorKind::MissingOperand { index, got } }
	}

	/// Ditto.
	pub fn unsupported_mode(name: &str, mnemonic: &str, mode: AddrMode) -> GenError {
		GenError { name: name.into(), kind: GenErrorKind::UnsupportedMode { mnemonic: mnemonic.into(), mode } }
	}

	/// Whether generation can go on without this descriptor. Everything but an unknown mnemonic
	/// means the catalog itself is broken.
	pub fn is_recoverable(&self) -> bool {
		matches!(self.kind, GenErrorKind::UnknownMnemonic { .. })
	}
}

// ------------------------------------------------------------------------------------------------
// GenResult
// ------------------------------------------------------------------------------------------------

/// Alias for a `Result` with a `GenError` as its error type.
pub type GenResult<T> = Result<T, GenError>;
