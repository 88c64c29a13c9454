//! Turning a catalog into `BBCPUInstrInfo.td`.

use enum_dispatch::enum_dispatch;
use lazy_static::lazy_static;

use crate::bbcpu::{ classify, Template };
use crate::catalog::Catalog;

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod boilerplate;
mod error;
mod render;

pub use error::*;
pub use render::*;

use boilerplate::*;

// ------------------------------------------------------------------------------------------------
// Generated
// ------------------------------------------------------------------------------------------------

/// The output of a generation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Generated {
	/// The complete `.td` file.
	pub text: String,
	/// How many opcode bindings were written.
	pub opcodes: usize,
	/// The instruction records, in catalog order.
	pub records: Vec<Record>,
	/// Descriptors that were skipped, and why.
	pub diagnostics: Vec<GenError>,
}

// ------------------------------------------------------------------------------------------------
// Sections
// ------------------------------------------------------------------------------------------------

/// The pieces of the output file, in the order they're written.
#[enum_dispatch]
pub enum Section {
	StaticSection,
	OpcodeSection,
	TemplateSection,
	InstrSection,
}

/// Trait for output sections.
#[enum_dispatch(Section)]
pub trait ISection {
	/// Appends this section's text to `out`.
	fn emit(&self, catalog: &Catalog, out: &mut Generated) -> GenResult<()>;
}

/// Text that's the same no matter the catalog.
pub struct StaticSection(&'static str);

impl ISection for StaticSection {
	fn emit(&self, _catalog: &Catalog, out: &mut Generated) -> GenResult<()> {
		out.text.push_str(self.0);
		Ok(())
	}
}

/// One `OPC_` binding per descriptor, including ones that get skipped later.
pub struct OpcodeSection;

impl ISection for OpcodeSection {
	fn emit(&self, catalog: &Catalog, out: &mut Generated) -> GenResult<()> {
		for desc in catalog {
			out.text.push_str(&render_opcode(desc));
			out.opcodes += 1;
		}

		Ok(())
	}
}

/// The base class and all the template classes.
pub struct TemplateSection;

impl ISection for TemplateSection {
	fn emit(&self, _catalog: &Catalog, out: &mut Generated) -> GenResult<()> {
		out.text.push_str(BASE_CLASSES);

		for desc in Template::all().iter().filter(|d| !d.template.is_inline()) {
			out.text.push_str(&render_class(desc));
		}

		Ok(())
	}
}

/// One instruction definition per descriptor.
pub struct InstrSection;

impl ISection for InstrSection {
	fn emit(&self, catalog: &Catalog, out: &mut Generated) -> GenResult<()> {
		for desc in catalog {
			let classified = match classify(desc) {
				Ok(c) => c,
				Err(e) if e.is_recoverable() => {
					log::warn!("skipping {}", e);
					out.diagnostics.push(e);
					continue;
				}
				Err(e) => return Err(e),
			};

			let record = Record::instantiate(&classified);
			out.text.push_str(&record.render());
			out.records.push(record);
		}

		Ok(())
	}
}

lazy_static! {
	static ref SECTIONS: Vec<Section> = vec![
		StaticSection(OPERAND_CLASSES).into(),
		StaticSection(OPCODE_PREAMBLE).into(),
		OpcodeSection.into(),
		TemplateSection.into(),
		InstrSection.into(),
		StaticSection(ALIASES).into(),
	];
}

// ------------------------------------------------------------------------------------------------
// generate
// ------------------------------------------------------------------------------------------------

/// Generates the instruction definitions for a catalog.
///
/// Descriptors with unknown mnemonics are skipped (they still get an opcode binding) and show up
/// in `diagnostics`. Any other problem with a descriptor fails the whole run.
///
/// ```
/// use bbgen::{ generate, Catalog, InstrDesc };
/// let catalog = Catalog::from_descs(vec![InstrDesc::new("NOP", "NOP", 0, &[])]).unwrap();
/// let out = generate(&catalog).unwrap();
/// assert!(out.text.contains("def OPC_NOP : BBCPUOpcode<0>;\n"));
/// assert!(out.text.contains("def NOP : BBCPUNoopInstr<OPC_NOP, \"nop\">;\n"));
/// ```
pub fn generate(catalog: &Catalog) -> GenResult<Generated> {
	let mut out = Generated::default();

	for section in SECTIONS.iter() {
		section.emit(catalog, &mut out)?;
	}

	log::info!("wrote {} opcodes and {} instructions ({} skipped)",
		out.opcodes, out.records.len(), out.diagnostics.len());

	Ok(out)
}
