use std::fmt::{ Display, Formatter, Result as FmtResult };

use smallvec::{ smallvec, SmallVec };

use crate::bbcpu::{ Classified, Shape, Sources, Template, TemplateDesc };
use crate::catalog::InstrDesc;

// ------------------------------------------------------------------------------------------------
// Operand
// ------------------------------------------------------------------------------------------------

/// One template argument of a record, between the opcode and the strings.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Operand {
	/// A register, e.g. `A`.
	Reg(String),
	/// An address register used as a pointer. Shows up as `AT_A` etc.
	Indexed(String),
	/// A literal input dag, e.g. `(ins DR:$src1, DR:$src2)`.
	Dag(&'static str),
}

impl Operand {
	/// How it's written in assembly; dags have no spelling of their own.
	pub fn asm_name(&self) -> String {
		match self {
			Operand::Reg(r) | Operand::Indexed(r) => r.to_lowercase(),
			Operand::Dag(_)                       => String::new(),
		}
	}
}

impl Display for Operand {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Operand::Reg(r)     => write!(f, "{}", r),
			Operand::Indexed(r) => write!(f, "AT_{}", r),
			Operand::Dag(d)     => write!(f, "{}", d),
		}
	}
}

const DATA_REGS: &str = "(ins DR:$src1, DR:$src2)";
const NO_INS:    &str = "(ins)";

fn source_operands(srcs: &Sources) -> SmallVec<[Operand; 3]> {
	match srcs {
		Sources::Nothing       => smallvec![Operand::Dag(NO_INS)],
		Sources::DataRegs      => smallvec![Operand::Dag(DATA_REGS)],
		Sources::Regs(s1, s2)  => smallvec![Operand::Reg(s1.clone()), Operand::Reg(s2.clone())],
	}
}

// what comes after the destination in the operand string.
fn source_asm(srcs: &Sources) -> String {
	match srcs {
		Sources::Nothing       => String::new(),
		Sources::DataRegs      => ", $src1, $src2".into(),
		Sources::Regs(s1, s2)  => format!(", {}, {}", s1.to_lowercase(), s2.to_lowercase()),
	}
}

// ------------------------------------------------------------------------------------------------
// Record
// ------------------------------------------------------------------------------------------------

/// One instruction definition, ready to be rendered.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Record {
	pub name:     String,
	pub template: Template,
	/// Registers read on top of what the template says; these wrap the def in a `let ... in`.
	pub extra_uses: &'static [&'static str],
	pub operands: SmallVec<[Operand; 3]>,
	/// Assembly mnemonic.
	pub spelling: String,
	/// Operand string, for templates that take one.
	pub asm:      Option<String>,
}

impl Record {
	/// Turns a classified descriptor into a record.
	pub fn instantiate(c: &Classified) -> Record {
		use Operand::{ Indexed, Reg };

		let lower = |r: &String| r.to_lowercase();

		let (template, operands, asm): (Template, SmallVec<[Operand; 3]>, Option<String>) =
		match &c.shape {
			Shape::Implied | Shape::ImpliedUsesT =>
				(Template::Noop, smallvec![], None),
			Shape::RegImm { dst } =>
				(Template::RegImm, smallvec![Reg(dst.clone())], Some(format!("{}, $imm", lower(dst)))),
			Shape::RegAbs { dst } =>
				(Template::RegMem, smallvec![Reg(dst.clone())], Some(format!("{}, $imm", lower(dst)))),
			Shape::RegAbsZp { dst } =>
				(Template::RegMemZp, smallvec![Reg(dst.clone())], Some(format!("{}, $imm", lower(dst)))),
			Shape::RegReg { dst, src } =>
				(Template::BinaryReg, smallvec![Reg(dst.clone()), Reg(src.clone())],
					Some(format!("{}, {}", lower(dst), lower(src)))),
			Shape::RegRegReg { dst, src1, src2 } =>
				(Template::TernaryReg, smallvec![Reg(dst.clone()), Reg(src1.clone()), Reg(src2.clone())],
					Some(format!("{}, {}, {}", lower(dst), lower(src1), lower(src2)))),
			Shape::RegData { dst } =>
				(Template::Reg, smallvec![Reg(dst.clone()), Operand::Dag(DATA_REGS)],
					Some(format!("{}, $src1, $src2", lower(dst)))),
			Shape::DefReg { dst } =>
				(Template::DReg, smallvec![Reg(dst.clone())], None),
			Shape::UseReg { src } =>
				(Template::SReg, smallvec![Reg(src.clone())], None),
			Shape::Mem { srcs } =>
				(Template::Mem, source_operands(srcs), Some(format!("$imm{}", source_asm(srcs)))),
			Shape::MemZp { srcs } =>
				(Template::MemZp, source_operands(srcs), Some(format!("$imm{}", source_asm(srcs)))),
			Shape::MemReg { src } =>
				(Template::MemReg, smallvec![Reg(src.clone())], Some(format!("$imm, {}", lower(src)))),
			Shape::MemZpReg { src } =>
				(Template::MemZpReg, smallvec![Reg(src.clone())], Some(format!("$imm, {}", lower(src)))),
			Shape::MemRegReg { src1, src2 } =>
				(Template::MemBinaryReg, smallvec![Reg(src1.clone()), Reg(src2.clone())],
					Some(format!("$imm, {}, {}", lower(src1), lower(src2)))),
			Shape::PushAbs =>
				(Template::SMem, smallvec![], None),
			Shape::PushAbsZp =>
				(Template::SMemZp, smallvec![], None),
			Shape::PushImm =>
				(Template::Imm, smallvec![], None),
			Shape::StcReg { src } =>
				(Template::StcReg, smallvec![Reg(src.clone())], None),
			Shape::Stc { srcs } =>
				(Template::Stc, source_operands(srcs), Some(format!("$dst{}", source_asm(srcs)))),
			Shape::IndexedReg { dst, src } =>
				(Template::IndexedReg, smallvec![Indexed(dst.clone()), Reg(src.clone())], None),
			Shape::IndexedImm { dst } =>
				(Template::IndexedImm, smallvec![Indexed(dst.clone())], None),
			Shape::ImmToMem { zero_page: false } =>
				(Template::ImmToMem, smallvec![], None),
			Shape::ImmToMem { zero_page: true } =>
				(Template::ImmToMemZp, smallvec![], None),
			Shape::Cmp { lhs, rhs } =>
				(Template::Cmp, smallvec![Reg(lhs.clone()), Reg(rhs.clone())], None),
			Shape::Jump =>
				(Template::JmpImm, smallvec![], None),
			Shape::JumpReg { reg } =>
				(Template::JmpReg, smallvec![Reg(reg.clone())], None),
			Shape::RelJump =>
				(Template::RelJmpImm, smallvec![], None),
			Shape::RelJumpReg { reg } =>
				(Template::RelJmpReg, smallvec![Reg(reg.clone())], None),
		};

		let extra_uses: &'static [&'static str] = match c.shape {
			Shape::ImpliedUsesT => &["T"],
			_                   => &[],
		};

		Record {
			name: c.name.clone(),
			template,
			extra_uses,
			operands,
			spelling: c.spelling.clone(),
			asm,
		}
	}

	/// Encoded size in bytes.
	pub fn size(&self) -> usize {
		self.template.size()
	}

	/// The operand string as the assembler will see it once the template fills it in. `None` if
	/// the record lacks an operand or string its template needs.
	pub fn asm_operands(&self) -> Option<String> {
		use Template::*;

		let reg = |i: usize| self.operands.get(i).map(Operand::asm_name);

		let ops = match self.template {
			Reg | BinaryReg | TernaryReg | RegImm | RegMem | RegMemZp
			| Mem | MemZp | MemReg | MemZpReg | MemBinaryReg | Stc => return self.asm.clone(),

			Noop                                     => String::new(),
			SReg | DReg | JmpReg | RelJmpReg         => reg(0)?,
			IndexedReg                               => format!("$dst, {}", reg(1)?),
			StcReg                                   => format!("$dst, {}", reg(0)?),
			Cmp                                      => format!("{}, {}", reg(0)?, reg(1)?),
			IndexedImm                               => "$dst, $imm".into(),
			ImmToMem | ImmToMemZp                    => "$dst, $src".into(),
			SMem | SMemZp | JmpImm | RelJmpImm | Imm => "$imm".into(),
		};

		Some(ops)
	}

	/// The full assembly string, `opcodestr # " " # argstr`.
	pub fn assembly(&self) -> Option<String> {
		self.asm_operands().map(|ops| format!("{} {}", self.spelling, ops))
	}

	/// Renders the `def` line (or block, for inline templates), ending with a newline.
	pub fn render(&self) -> String {
		if self.template.is_inline() {
			return self.render_inline();
		}

		let mut args = vec![format!("OPC_{}", self.name)];
		args.extend(self.operands.iter().map(|o| o.to_string()));

		if self.template.takes_mnemonic() {
			args.push(format!("\"{}\"", self.spelling));
		}

		if let Some(asm) = &self.asm {
			args.push(format!("\"{}\"", asm));
		}

		format!("{}def {} : {}<{}>;\n",
			self.let_prefix(), self.name, self.template.desc().class, args.join(", "))
	}

	fn let_prefix(&self) -> String {
		if self.extra_uses.is_empty() {
			String::new()
		} else {
			format!("let Uses = [{}] in ", self.extra_uses.join(", "))
		}
	}

	fn render_inline(&self) -> String {
		let desc = self.template.desc();
		let mut ret = format!("def {} : {}<{}, {}, \"{}\", {}, []> {{\n",
			self.name, desc.class, desc.outs, desc.ins, self.spelling, desc.argstr);

		for field in desc.fields {
			ret += &format!("  bits<{}> {};\n", field.width, field.name);
		}

		ret += "\n";
		ret += &format!("  let Size = {};\n", self.size());
		ret += &format!("  let Opcode = OPC_{}.Value;\n", self.name);

		if !desc.uses.is_empty() {
			ret += &format!("  let Uses = [{}];\n", desc.uses.join(", "));
		}

		ret += "\n";
		ret += &encoding_lines(desc).join("\n");
		ret += "\n}\n";
		ret
	}
}

// ------------------------------------------------------------------------------------------------
// Classes and opcodes
// ------------------------------------------------------------------------------------------------

fn encoding_lines(desc: &TemplateDesc) -> Vec<String> {
	let mut fields = desc.fields.to_vec();
	fields.sort_by_key(|f| f.lo);

	fields.iter()
		.map(|f| format!("  let Inst{{{}-{}}} = {};", f.hi(), f.lo, f.name))
		.collect()
}

/// Renders a template's class declaration, followed by a blank line.
pub fn render_class(desc: &TemplateDesc) -> String {
	let mut blocks: Vec<Vec<String>> = Vec::new();

	blocks.push(desc.decls.iter().map(|d| format!("  {}", d)).collect());

	let mut lets = Vec::new();

	if !desc.defs.is_empty() {
		lets.push(format!("  let Defs = [{}];", desc.defs.join(", ")));
	}

	if !desc.uses.is_empty() {
		lets.push(format!("  let Uses = [{}];", desc.uses.join(", ")));
	}

	blocks.push(lets);
	blocks.push(desc.fields.iter().map(|f| format!("  bits<{}> {};", f.width, f.name)).collect());

	let size = desc.template.size();

	if size != 1 {
		blocks.push(vec![format!("  let Size = {};", size)]);
	}

	let mut encoding = vec!["  let Opcode = opcode.Value;".to_string()];
	encoding.extend(encoding_lines(desc));
	blocks.push(encoding);

	let body = blocks.iter()
		.filter(|b| !b.is_empty())
		.map(|b| b.join("\n"))
		.collect::<Vec<_>>()
		.join("\n\n");

	format!("class {}<{}>\n    : BBCPUInstr<{}, {}, {}, {}, []> {{\n{}\n}}\n\n",
		desc.class, desc.params, desc.outs, desc.ins, desc.opcodestr, desc.argstr, body)
}

/// Renders a descriptor's opcode binding.
pub fn render_opcode(desc: &InstrDesc) -> String {
	format!("def OPC_{} : BBCPUOpcode<{}>;\n", desc.name, desc.opcode)
}
