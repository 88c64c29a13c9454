use std::error::Error;

use parse_display::Display;

// ------------------------------------------------------------------------------------------------
// CatalogErrorKind
// ------------------------------------------------------------------------------------------------

/// The kinds of catalog loading errors.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
pub enum CatalogErrorKind {
	/// The configuration source couldn't be read at all.
	#[display("could not read '{path}': {msg}")]
	Io { path: String, msg: String },

	/// Bad JSON, or JSON that doesn't describe instructions.
	#[display("malformed catalog: {msg}")]
	Malformed { msg: String },

	/// Two descriptors share a name.
	#[display("duplicate instruction name '{name}'")]
	DuplicateName { name: String },

	/// Two descriptors share an opcode.
	#[display("opcode {opcode} is used by both '{first}' and '{second}'")]
	DuplicateOpcode { opcode: u8, first: String, second: String },
}

// ------------------------------------------------------------------------------------------------
// CatalogError
// ------------------------------------------------------------------------------------------------

/// The catalog error type.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
#[display("catalog error: {kind}")]
pub struct CatalogError {
	/// kind of error.
	pub kind: CatalogErrorKind,
}

impl Error for CatalogError {}

impl CatalogError {
	/// Shorthand constructors.
	pub fn io(path: &str, msg: &str) -> CatalogError {
		CatalogError { kind: CatalogErrorKind::Io { path: path.into(), msg: msg.into() } }
	}

	/// Ditto.
	pub fn malformed(msg: &str) -> CatalogError {
		CatalogError { kind: CatalogErrorKind::Malformed { msg: msg.into() } }
	}

	/// Ditto.
	pub fn duplicate_name(name: &str) -> CatalogError {
		CatalogError { kind: CatalogErrorKind::DuplicateName { name: name.into() } }
	}

	/// Ditto.
	pub fn duplicate_opcode(opcode: u8, first: &str, second: &str) -> CatalogError {
		CatalogError { kind: CatalogErrorKind::DuplicateOpcode {
			opcode,
			first:  first.into(),
			second: second.into(),
		} }
	}
}

// ------------------------------------------------------------------------------------------------
// CatalogResult
// ------------------------------------------------------------------------------------------------

/// Alias for a `Result` with a `CatalogError` as its error type.
pub type CatalogResult<T> = Result<T, CatalogError>;
