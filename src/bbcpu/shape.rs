use derive_new::new;

use crate::catalog::InstrDesc;
use crate::gen::{ GenError, GenResult };
use super::{ AddrMode, Family };

// ------------------------------------------------------------------------------------------------
// Sources
// ------------------------------------------------------------------------------------------------

/// Where a memory- or stack-destination ALU op gets its inputs.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Sources {
	/// No inputs (`pop` to memory).
	Nothing,
	/// The two data registers, chosen by the register allocator (`$src1`, `$src2`).
	DataRegs,
	/// Two fixed registers.
	Regs(String, String),
}

// ------------------------------------------------------------------------------------------------
// Shape
// ------------------------------------------------------------------------------------------------

/// An instruction's resolved operand layout, along with which registers fill which roles.
/// Register fields hold catalog register names (`A`, `TL`...).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Shape {
	/// No operands.
	Implied,
	/// No operands, but reads `T` (return).
	ImpliedUsesT,
	/// `dst <- imm8`.
	RegImm { dst: String },
	/// `dst <- [abs16]`.
	RegAbs { dst: String },
	/// `dst <- [zp8]`.
	RegAbsZp { dst: String },
	/// `dst <- op(src)`.
	RegReg { dst: String, src: String },
	/// `dst <- op(src1, src2)`.
	RegRegReg { dst: String, src1: String, src2: String },
	/// `dst <- op($src1, $src2)`.
	RegData { dst: String },
	/// Writes one register.
	DefReg { dst: String },
	/// Reads one register.
	UseReg { src: String },
	/// `[abs16] <- op(sources)`.
	Mem { srcs: Sources },
	/// `[zp8] <- op(sources)`.
	MemZp { srcs: Sources },
	/// `[abs16] <- op(src)`.
	MemReg { src: String },
	/// `[zp8] <- op(src)`.
	MemZpReg { src: String },
	/// `[abs16] <- op(src1, src2)`.
	MemRegReg { src1: String, src2: String },
	/// Pushes from a 16-bit address.
	PushAbs,
	/// Pushes from a zero-page address.
	PushAbsZp,
	/// Pushes an immediate.
	PushImm,
	/// `[stack] <- op(src)`.
	StcReg { src: String },
	/// `[stack] <- op(sources)`.
	Stc { srcs: Sources },
	/// `[dst] <- src`, `dst` being an address register.
	IndexedReg { dst: String, src: String },
	/// `[dst] <- imm8`, `dst` being an address register.
	IndexedImm { dst: String },
	/// `[addr] <- imm8`: the four-byte moves.
	ImmToMem { zero_page: bool },
	/// Compares two registers.
	Cmp { lhs: String, rhs: String },
	/// Jump to a 16-bit immediate (also `call`).
	Jump,
	/// Jump to a register.
	JumpReg { reg: String },
	/// Relative jump by an 8-bit immediate.
	RelJump,
	/// Relative jump by a register.
	RelJumpReg { reg: String },
}

// ------------------------------------------------------------------------------------------------
// Classified
// ------------------------------------------------------------------------------------------------

/// The result of classifying a descriptor: everything the renderer needs.
#[derive(Debug, PartialEq, Eq, Clone, new)]
pub struct Classified {
	pub name:     String,
	pub family:   Family,
	pub mode:     AddrMode,
	pub shape:    Shape,
	/// Assembly mnemonic, e.g. `mov` or `jrz`.
	pub spelling: String,
}

/// Classifies one descriptor. This is a pure function of the descriptor.
///
/// ```
/// use bbgen::{ classify, InstrDesc, AddrMode, Shape };
/// let c = classify(&InstrDesc::new("MOVAABSZP", "MOV", 9, &["A"])).unwrap();
/// assert_eq!(c.mode, AddrMode::AbsZp);
/// assert_eq!(c.shape, Shape::RegAbsZp { dst: "A".into() });
/// ```
pub fn classify(desc: &InstrDesc) -> GenResult<Classified> {
	let family = Family::of(&desc.mnemonic)
		.ok_or_else(|| GenError::unknown_mnemonic(&desc.name, &desc.mnemonic))?;

	let mode = match desc.addr_mode {
		Some(mode) => mode,
		None       => family.infer_mode(&desc.name),
	};

	let shape = bind(family, mode, &Args(desc))?;
	let spelling = family.spelling(mode, desc);

	log::trace!("{} ({}) -> {:?} {:?}", desc.name, desc.mnemonic, mode, shape);

	Ok(Classified::new(desc.name.clone(), family, mode, shape, spelling))
}

// ------------------------------------------------------------------------------------------------
// Operand binding
// ------------------------------------------------------------------------------------------------

struct Args<'d>(&'d InstrDesc);

impl Args<'_> {
	fn reg(&self, i: usize) -> GenResult<String> {
		self.0.arguments.get(i)
			.cloned()
			.ok_or_else(|| GenError::missing_operand(&self.0.name, i, self.0.arguments.len()))
	}

	// some forms don't use an argument, but catalogs still have to list it.
	fn require(&self, n: usize) -> GenResult<()> {
		self.reg(n - 1).map(|_| ())
	}

	fn fixed_srcs(&self) -> GenResult<Sources> {
		self.require(3)?;
		Ok(Sources::Regs(self.reg(1)?, self.reg(2)?))
	}
}

fn bind(family: Family, mode: AddrMode, args: &Args) -> GenResult<Shape> {
	use Family::*;
	use AddrMode as M;

	let shape = match (family, mode) {
		(Mov,   M::Imm)      => Shape::RegImm    { dst: args.reg(0)? },
		(Mov,   M::AbsZp)    => Shape::RegAbsZp  { dst: args.reg(0)? },
		(Mov,   M::Abs)      => Shape::RegAbs    { dst: args.reg(0)? },
		(Mov,   M::Reg)      => Shape::RegReg    { dst: args.reg(0)?, src: args.reg(1)? },

		(MovAt, M::AbsImmZp) => Shape::ImmToMem  { zero_page: true },
		(MovAt, M::AbsImm)   => Shape::ImmToMem  { zero_page: false },
		(MovAt, M::Imm)      => Shape::IndexedImm { dst: args.reg(0)? },
		(MovAt, M::AbsZp)    => Shape::MemZpReg  { src: args.reg(1)? },
		(MovAt, M::Abs)      => Shape::MemReg    { src: args.reg(1)? },
		(MovAt, M::Reg)      => Shape::IndexedReg { dst: args.reg(0)?, src: args.reg(1)? },

		(Unary, M::MemZp)    => Shape::MemZpReg  { src: args.reg(1)? },
		(Unary, M::Mem)      => Shape::MemReg    { src: args.reg(1)? },
		(Unary, M::Stc)      => Shape::StcReg    { src: args.reg(1)? },
		(Unary, M::Reg)      => Shape::RegReg    { dst: args.reg(0)?, src: args.reg(1)? },

		(Logic, M::MemZp)    => { args.require(1)?; Shape::MemZp { srcs: Sources::DataRegs } }
		(Logic, M::Mem)      => { args.require(1)?; Shape::Mem   { srcs: Sources::DataRegs } }
		(Logic, M::Stc)      => { args.require(1)?; Shape::Stc   { srcs: Sources::DataRegs } }
		(Logic, M::Reg)      => Shape::RegData   { dst: args.reg(0)? },

		(Sub,   M::MemZp)    => Shape::MemZp     { srcs: args.fixed_srcs()? },
		(Sub,   M::Stc)      => Shape::Stc       { srcs: args.fixed_srcs()? },
		(Sub,   M::Mem)      => {
			args.require(3)?;
			Shape::MemRegReg { src1: args.reg(1)?, src2: args.reg(2)? }
		}
		(Sub,   M::Reg)      => {
			args.require(3)?;
			Shape::RegRegReg { dst: args.reg(0)?, src1: args.reg(1)?, src2: args.reg(2)? }
		}

		(Cmp,   M::Reg)      => Shape::Cmp       { lhs: args.reg(0)?, rhs: args.reg(1)? },
		(Step,  M::Reg)      => Shape::UseReg    { src: args.reg(0)? },

		(Jump,  M::T)        => Shape::JumpReg   { reg: "T".into() },
		(Jump,  M::Imm)      => { args.require(1)?; Shape::Jump }

		(RelJump, M::Call)   => Shape::Jump,
		(RelJump, M::Ret)    => Shape::ImpliedUsesT,
		(RelJump, M::Tl)     => Shape::RelJumpReg { reg: "TL".into() },
		(RelJump, M::T)      => Shape::RelJumpReg { reg: "T".into() },
		(RelJump, M::Imm)    => { args.require(1)?; Shape::RelJump }

		(Push,  M::Imm)      => Shape::PushImm,
		(Push,  M::AbsZp)    => Shape::PushAbsZp,
		(Push,  M::Abs)      => Shape::PushAbs,
		(Push,  M::Reg)      => Shape::UseReg    { src: args.reg(0)? },

		(Pop,   M::MemZp)    => { args.require(1)?; Shape::MemZp { srcs: Sources::Nothing } }
		(Pop,   M::Mem)      => { args.require(1)?; Shape::Mem   { srcs: Sources::Nothing } }
		(Pop,   M::Reg)      => Shape::DefReg    { dst: args.reg(0)? },

		(Implied,   M::Implied) |
		(Interrupt, M::Implied) => Shape::Implied,

		(_, mode) => return Err(GenError::unsupported_mode(&args.0.name, &args.0.mnemonic, mode)),
	};

	Ok(shape)
}
