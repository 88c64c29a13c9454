use bitflags::bitflags;

// ------------------------------------------------------------------------------------------------
// PhysRegs
// ------------------------------------------------------------------------------------------------

bitflags! {
	/// The physical registers templates can implicitly read or write.
	pub struct PhysRegs: u8 {
		const A = 0b001;
		const B = 0b010;
		const T = 0b100;
	}
}

impl PhysRegs {
	/// Looks up a register by its TableGen name. Template parameters (`dst`, `src1`...) aren't
	/// physical registers and give `None`.
	pub fn from_name(name: &str) -> Option<PhysRegs> {
		match name {
			"A" => Some(PhysRegs::A),
			"B" => Some(PhysRegs::B),
			"T" => Some(PhysRegs::T),
			_   => None,
		}
	}

	fn from_names(names: &[&str]) -> PhysRegs {
		names.iter()
			.filter_map(|n| PhysRegs::from_name(n))
			.fold(PhysRegs::empty(), |acc, r| acc | r)
	}
}

// ------------------------------------------------------------------------------------------------
// BitField
// ------------------------------------------------------------------------------------------------

/// A field of the instruction encoding past the opcode byte.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BitField {
	/// Name of the operand that goes here.
	pub name:  &'static str,
	/// Width in bits; always a multiple of 8.
	pub width: usize,
	/// Lowest bit of `Inst` it occupies.
	pub lo:    usize,
}

impl BitField {
	const fn new(name: &'static str, width: usize, lo: usize) -> Self {
		Self { name, width, lo }
	}

	/// Highest bit of `Inst` it occupies.
	pub fn hi(&self) -> usize {
		self.lo + self.width - 1
	}
}

const IMM8:  &[BitField] = &[BitField::new("imm", 8, 8)];
const IMM16: &[BitField] = &[BitField::new("imm", 16, 8)];
const IMM_TO_MEM: &[BitField] = &[BitField::new("src", 8, 24), BitField::new("dst", 16, 8)];

// ------------------------------------------------------------------------------------------------
// Template
// ------------------------------------------------------------------------------------------------

/// The instruction templates (TableGen classes) records are instantiated from. The order matches
/// `TEMPLATES`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Template {
	Noop,
	Reg,
	SReg,
	DReg,
	BinaryReg,
	TernaryReg,
	RegImm,
	RegMem,
	Mem,
	MemZp,
	SMem,
	SMemZp,
	RegMemZp,
	MemReg,
	MemZpReg,
	MemBinaryReg,
	IndexedReg,
	IndexedImm,
	StcReg,
	JmpImm,
	JmpReg,
	RelJmpImm,
	RelJmpReg,
	Imm,
	Stc,
	Cmp,
	/// Not a class; four-byte moves are written out as a complete `def`.
	ImmToMem,
	/// Ditto.
	ImmToMemZp,
}

impl Template {
	/// Its skeleton.
	pub fn desc(self) -> &'static TemplateDesc {
		&TEMPLATES[self as usize]
	}

	/// All skeletons, in declaration order.
	pub fn all() -> &'static [TemplateDesc] {
		TEMPLATES
	}

	/// Whether records using this are written out in full instead of instantiating a class.
	pub fn is_inline(self) -> bool {
		matches!(self, Template::ImmToMem | Template::ImmToMemZp)
	}

	/// Whether the class takes the mnemonic as a parameter. `Cmp` hardcodes it.
	pub fn takes_mnemonic(self) -> bool {
		self != Template::Cmp
	}

	/// Encoded size in bytes: the opcode plus all its fields.
	pub fn size(self) -> usize {
		1 + self.desc().fields.iter().map(|f| f.width / 8).sum::<usize>()
	}

	/// Physical registers this reads no matter how it's instantiated.
	pub fn implicit_uses(self) -> PhysRegs {
		PhysRegs::from_names(self.desc().uses)
	}
}

// ------------------------------------------------------------------------------------------------
// TemplateDesc
// ------------------------------------------------------------------------------------------------

/// Everything needed to declare a template class.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct TemplateDesc {
	pub template:  Template,
	/// TableGen class name.
	pub class:     &'static str,
	/// Class parameters.
	pub params:    &'static str,
	pub outs:      &'static str,
	pub ins:       &'static str,
	/// Expression for the mnemonic passed to `BBCPUInstr`.
	pub opcodestr: &'static str,
	/// Expression for the operand string passed to `BBCPUInstr`.
	pub argstr:    &'static str,
	/// Extra member declarations, e.g. `IndexedReg dst;`.
	pub decls:     &'static [&'static str],
	pub defs:      &'static [&'static str],
	pub uses:      &'static [&'static str],
	pub fields:    &'static [BitField],
}

const OPC:      &str = "BBCPUOpcode opcode";
const OPC_STR:  &str = "BBCPUOpcode opcode, string opcodestr";

const TEMPLATES: &[TemplateDesc] = &[
	TemplateDesc {
		template: Template::Noop, class: "BBCPUNoopInstr", params: OPC_STR,
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "\"\"",
		decls: &[], defs: &[], uses: &[], fields: &[],
	},
	TemplateDesc {
		template: Template::Reg, class: "BBCPURegInstr",
		params: "BBCPUOpcode opcode, Register dst, dag ins, string opcodestr, string argstr",
		outs: "(outs)", ins: "ins", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &["dst"], uses: &[], fields: &[],
	},
	TemplateDesc {
		template: Template::SReg, class: "BBCPUSRegInstr",
		params: "BBCPUOpcode opcode, Register src, string opcodestr",
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "src.AsmName",
		decls: &[], defs: &[], uses: &["src"], fields: &[],
	},
	TemplateDesc {
		template: Template::DReg, class: "BBCPUDRegInstr",
		params: "BBCPUOpcode opcode, Register dst, string opcodestr",
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "dst.AsmName",
		decls: &[], defs: &["dst"], uses: &[], fields: &[],
	},
	TemplateDesc {
		template: Template::BinaryReg, class: "BBCPUBinaryRegInstr",
		params: "BBCPUOpcode opcode, Register dst, Register src, string opcodestr, string argstr",
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &["dst"], uses: &["src"], fields: &[],
	},
	TemplateDesc {
		template: Template::TernaryReg, class: "BBCPUTernaryRegInstr",
		params: "BBCPUOpcode opcode, Register dst, Register src1, Register src2, \
			string opcodestr, string argstr",
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &["dst"], uses: &["src1", "src2"], fields: &[],
	},
	TemplateDesc {
		template: Template::RegImm, class: "BBCPURegImmInstr",
		params: "BBCPUOpcode opcode, Register dst, string opcodestr, string argstr",
		outs: "(outs)", ins: "(ins imm8:$imm)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &["dst"], uses: &[], fields: IMM8,
	},
	TemplateDesc {
		template: Template::RegMem, class: "BBCPURegMemInstr",
		params: "BBCPUOpcode opcode, Register dst, string opcodestr, string argstr",
		outs: "(outs)", ins: "(ins mem:$imm)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &["dst"], uses: &["T"], fields: IMM16,
	},
	TemplateDesc {
		template: Template::Mem, class: "BBCPUMemInstr",
		params: "BBCPUOpcode opcode, dag ins, string opcodestr, string argstr",
		outs: "(outs mem:$imm)", ins: "ins", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &[], uses: &["T"], fields: IMM16,
	},
	TemplateDesc {
		template: Template::MemZp, class: "BBCPUMemZPInstr",
		params: "BBCPUOpcode opcode, dag ins, string opcodestr, string argstr",
		outs: "(outs memzp:$imm)", ins: "ins", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &[], uses: &["T"], fields: IMM8,
	},
	TemplateDesc {
		template: Template::SMem, class: "BBCPUSMemInstr", params: OPC_STR,
		outs: "(outs)", ins: "(ins mem:$imm)", opcodestr: "opcodestr", argstr: "\"$imm\"",
		decls: &[], defs: &[], uses: &["T"], fields: IMM16,
	},
	TemplateDesc {
		template: Template::SMemZp, class: "BBCPUSMemZPInstr", params: OPC_STR,
		outs: "(outs)", ins: "(ins memzp:$imm)", opcodestr: "opcodestr", argstr: "\"$imm\"",
		decls: &[], defs: &[], uses: &["T"], fields: IMM8,
	},
	TemplateDesc {
		template: Template::RegMemZp, class: "BBCPURegMemZPInstr",
		params: "BBCPUOpcode opcode, Register dst, string opcodestr, string argstr",
		outs: "(outs)", ins: "(ins memzp:$imm)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &["dst"], uses: &["T"], fields: IMM8,
	},
	TemplateDesc {
		template: Template::MemReg, class: "BBCPUMemRegInstr",
		params: "BBCPUOpcode opcode, Register src, string opcodestr, string argstr",
		outs: "(outs mem:$imm)", ins: "(ins)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &[], uses: &["src", "T"], fields: IMM16,
	},
	TemplateDesc {
		template: Template::MemZpReg, class: "BBCPUMemZPRegInstr",
		params: "BBCPUOpcode opcode, Register src, string opcodestr, string argstr",
		outs: "(outs memzp:$imm)", ins: "(ins)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &[], uses: &["src", "T"], fields: IMM8,
	},
	TemplateDesc {
		template: Template::MemBinaryReg, class: "BBCPUMemBinaryRegInstr",
		params: "BBCPUOpcode opcode, Register src1, Register src2, string opcodestr, string argstr",
		outs: "(outs mem:$imm)", ins: "(ins)", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &[], uses: &["src1", "src2", "T"], fields: IMM16,
	},
	TemplateDesc {
		template: Template::IndexedReg, class: "BBCPUIndexedRegInstr",
		params: "BBCPUOpcode opcode, IndexedReg dst, Register src, string opcodestr",
		outs: "(outs dst:$dst)", ins: "(ins)", opcodestr: "opcodestr",
		argstr: "!strconcat(\"$dst, \", src.AsmName)",
		decls: &["IndexedReg dst;"], defs: &[], uses: &["src", "T"], fields: &[],
	},
	TemplateDesc {
		template: Template::IndexedImm, class: "BBCPUIndexedImmInstr",
		params: "BBCPUOpcode opcode, IndexedReg dst, string opcodestr",
		outs: "(outs dst:$dst)", ins: "(ins imm8:$imm)", opcodestr: "opcodestr",
		argstr: "\"$dst, $imm\"",
		decls: &["IndexedReg dst;"], defs: &[], uses: &["T"], fields: IMM8,
	},
	TemplateDesc {
		template: Template::StcReg, class: "BBCPUStcRegInstr",
		params: "BBCPUOpcode opcode, Register src, string opcodestr",
		outs: "(outs stc:$dst)", ins: "(ins)", opcodestr: "opcodestr",
		argstr: "!strconcat(\"$dst, \", src.AsmName)",
		decls: &[], defs: &[], uses: &["src"], fields: &[],
	},
	TemplateDesc {
		template: Template::JmpImm, class: "BBCPUJmpImmInstr", params: OPC_STR,
		outs: "(outs)", ins: "(ins imm16:$imm)", opcodestr: "opcodestr", argstr: "\"$imm\"",
		decls: &[], defs: &[], uses: &[], fields: IMM16,
	},
	TemplateDesc {
		template: Template::JmpReg, class: "BBCPUJmpRegInstr",
		params: "BBCPUOpcode opcode, Register src, string opcodestr",
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "src.AsmName",
		decls: &[], defs: &[], uses: &[], fields: &[],
	},
	TemplateDesc {
		template: Template::RelJmpImm, class: "BBCPURelJmpImmInstr", params: OPC_STR,
		outs: "(outs)", ins: "(ins relimm8:$imm)", opcodestr: "opcodestr", argstr: "\"$imm\"",
		decls: &[], defs: &[], uses: &["A", "B"], fields: IMM8,
	},
	TemplateDesc {
		template: Template::RelJmpReg, class: "BBCPURelJmpRegInstr",
		params: "BBCPUOpcode opcode, Register src, string opcodestr",
		outs: "(outs)", ins: "(ins)", opcodestr: "opcodestr", argstr: "src.AsmName",
		decls: &[], defs: &[], uses: &["A", "B"], fields: &[],
	},
	TemplateDesc {
		template: Template::Imm, class: "BBCPUImmInstr", params: OPC_STR,
		outs: "(outs)", ins: "(ins imm8:$imm)", opcodestr: "opcodestr", argstr: "\"$imm\"",
		decls: &[], defs: &[], uses: &[], fields: IMM8,
	},
	TemplateDesc {
		template: Template::Stc, class: "BBCPUStcInstr",
		params: "BBCPUOpcode opcode, dag ins, string opcodestr, string argstr",
		outs: "(outs stc:$dst)", ins: "ins", opcodestr: "opcodestr", argstr: "argstr",
		decls: &[], defs: &[], uses: &[], fields: &[],
	},
	TemplateDesc {
		template: Template::Cmp, class: "BBCPUCmpInstr",
		params: "BBCPUOpcode opcode, Register r1, Register r2",
		outs: "(outs)", ins: "(ins)", opcodestr: "\"cmp\"",
		argstr: "!strconcat(r1.AsmName, \", \", r2.AsmName)",
		decls: &[], defs: &[], uses: &["r1", "r2", "A", "B"], fields: &[],
	},
	TemplateDesc {
		template: Template::ImmToMem, class: "BBCPUInstr", params: OPC,
		outs: "(outs mem:$dst)", ins: "(ins imm8:$src)", opcodestr: "opcodestr",
		argstr: "\"$dst, $src\"",
		decls: &[], defs: &[], uses: &["T"], fields: IMM_TO_MEM,
	},
	TemplateDesc {
		template: Template::ImmToMemZp, class: "BBCPUInstr", params: OPC,
		outs: "(outs memzp:$dst)", ins: "(ins imm8:$src)", opcodestr: "opcodestr",
		argstr: "\"$dst, $src\"",
		decls: &[], defs: &[], uses: &["T"], fields: IMM_TO_MEM,
	},
];
