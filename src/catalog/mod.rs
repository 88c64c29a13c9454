use std::collections::{ HashMap, HashSet };
use std::fmt::{ Formatter, Result as FmtResult };
use std::path::Path;
use std::slice::Iter as SliceIter;

use delegate::delegate;
use serde::{ Deserialize, Deserializer };
use serde::de::{ IgnoredAny, MapAccess, Visitor };

use crate::bbcpu::AddrMode;

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod error;
#[cfg(test)]
mod tests;

pub use error::*;

// ------------------------------------------------------------------------------------------------
// InstrDesc
// ------------------------------------------------------------------------------------------------

/// One instruction's entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstrDesc {
	/// Unique name; becomes the definition's name, and addressing-mode hints are read out of it.
	pub name: String,
	/// Instruction family, e.g. `MOV` or `JMPREL`.
	pub mnemonic: String,
	/// The opcode byte.
	pub opcode: u8,
	/// Register names or placeholders. What each position means depends on the family.
	#[serde(default)]
	pub arguments: Vec<String>,
	/// Condition flag a branch depends on; empty for unconditional ones.
	#[serde(default, rename = "depend-on-flag")]
	pub depend_on_flag: String,
	/// Explicit addressing mode. When absent it's inferred from `name`.
	#[serde(default, rename = "addr-mode")]
	pub addr_mode: Option<AddrMode>,
}

impl InstrDesc {
	/// Makes an unconditional descriptor with no explicit addressing mode.
	pub fn new(name: &str, mnemonic: &str, opcode: u8, arguments: &[&str]) -> Self {
		Self {
			name:           name.into(),
			mnemonic:       mnemonic.into(),
			opcode,
			arguments:      arguments.iter().map(|&a| a.into()).collect(),
			depend_on_flag: String::new(),
			addr_mode:      None,
		}
	}

	/// Builder-style setter for `depend_on_flag`.
	pub fn with_flag(mut self, flag: &str) -> Self {
		self.depend_on_flag = flag.into();
		self
	}

	/// Builder-style setter for `addr_mode`.
	pub fn with_mode(mut self, mode: AddrMode) -> Self {
		self.addr_mode = Some(mode);
		self
	}
}

// ------------------------------------------------------------------------------------------------
// Catalog
// ------------------------------------------------------------------------------------------------

/// The ordered list of instruction descriptors, in the order the configuration source lists them.
///
/// Names and opcodes are unique; constructing a catalog that breaks that fails.
///
/// ```
/// use bbgen::Catalog;
/// let catalog = Catalog::from_json(r#"{
///     "nop": { "name": "NOP",  "mnemonic": "NOP",  "opcode": 0 },
///     "hlt": { "name": "HALT", "mnemonic": "HALT", "opcode": 255 }
/// }"#).unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.iter().next().unwrap().name, "NOP");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
	descs: Vec<InstrDesc>,
}

impl Catalog {
	/// Builds a catalog from descriptors, checking that names and opcodes are unique.
	pub fn from_descs(descs: Vec<InstrDesc>) -> CatalogResult<Self> {
		let mut names = HashSet::new();
		let mut opcodes = HashMap::new();

		for desc in &descs {
			if !names.insert(desc.name.as_str()) {
				return Err(CatalogError::duplicate_name(&desc.name));
			}

			if let Some(first) = opcodes.insert(desc.opcode, desc.name.as_str()) {
				return Err(CatalogError::duplicate_opcode(desc.opcode, first, &desc.name));
			}
		}

		Ok(Self { descs })
	}

	/// Parses a catalog out of a JSON object whose values are descriptors. Keys are ignored.
	pub fn from_json(src: &str) -> CatalogResult<Self> {
		let raw: RawCatalog = serde_json::from_str(src)
			.map_err(|e| CatalogError::malformed(&e.to_string()))?;
		Self::from_descs(raw.0)
	}

	/// Reads and parses the catalog at `path`.
	pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
		let path = path.as_ref();
		let src = std::fs::read_to_string(path)
			.map_err(|e| CatalogError::io(&path.display().to_string(), &e.to_string()))?;

		let catalog = Self::from_json(&src)?;
		log::debug!("loaded {} descriptors from {}", catalog.len(), path.display());
		Ok(catalog)
	}

	delegate! {
		to self.descs {
			/// How many descriptors there are.
			pub fn len(&self) -> usize;
			/// Whether there are no descriptors at all.
			pub fn is_empty(&self) -> bool;
			/// Iterates over the descriptors in catalog order.
			pub fn iter(&self) -> SliceIter<'_, InstrDesc>;
		}
	}
}

impl<'a> IntoIterator for &'a Catalog {
	type Item = &'a InstrDesc;
	type IntoIter = SliceIter<'a, InstrDesc>;

	fn into_iter(self) -> Self::IntoIter {
		self.descs.iter()
	}
}

// ------------------------------------------------------------------------------------------------
// RawCatalog
// ------------------------------------------------------------------------------------------------

// the keys carry no meaning, but the order they come in is the output order, so this can't go
// through a HashMap or BTreeMap.
struct RawCatalog(Vec<InstrDesc>);

struct RawCatalogVisitor;

impl<'de> Visitor<'de> for RawCatalogVisitor {
	type Value = RawCatalog;

	fn expecting(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "an object mapping keys to instruction descriptors")
	}

	fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
	where M: MapAccess<'de> {
		let mut descs = Vec::with_capacity(map.size_hint().unwrap_or(0));

		while let Some((_, desc)) = map.next_entry::<IgnoredAny, InstrDesc>()? {
			descs.push(desc);
		}

		Ok(RawCatalog(descs))
	}
}

impl<'de> Deserialize<'de> for RawCatalog {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where D: Deserializer<'de> {
		deserializer.deserialize_map(RawCatalogVisitor)
	}
}
