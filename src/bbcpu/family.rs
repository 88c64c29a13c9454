use std::collections::HashMap;

use lazy_static::lazy_static;
use parse_display::Display;
use serde::Deserialize;

use crate::catalog::InstrDesc;

// ------------------------------------------------------------------------------------------------
// AddrMode
// ------------------------------------------------------------------------------------------------

/// How an instruction addresses its non-register operand. This is what the catalog's optional
/// `addr-mode` field holds; without it, it's dug out of the instruction's name. Displays the
/// same way catalogs spell it.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone, Hash, Deserialize)]
#[display(style = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AddrMode {
	/// Registers only, e.g. `mov a, b`.
	Reg,
	/// 8-bit immediate, e.g. `mov a, $imm`.
	Imm,
	/// 16-bit absolute address.
	Abs,
	/// 8-bit zero-page address.
	AbsZp,
	/// 16-bit absolute address as the *destination* of an ALU op.
	Mem,
	/// Zero-page address as the destination of an ALU op.
	MemZp,
	/// Stack-relative destination.
	Stc,
	/// Immediate stored to a 16-bit address (four bytes total).
	AbsImm,
	/// Immediate stored to a zero-page address (also four bytes).
	AbsImmZp,
	/// Through the `T` register.
	T,
	/// Through the `TL` register.
	Tl,
	/// Subroutine call.
	Call,
	/// Subroutine return.
	Ret,
	/// No operands at all.
	Implied,
}

// ------------------------------------------------------------------------------------------------
// ModeRule
// ------------------------------------------------------------------------------------------------

/// What a [`ModeRule`] looks for in an instruction name.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NameTest {
	/// The whole name, and nothing else.
	Exact(&'static str),
	/// Every one of these substrings, anywhere in the name.
	Contains(&'static [&'static str]),
}

/// One entry of a family's decision list: if the name passes `test`, the instruction uses `mode`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ModeRule {
	pub test: NameTest,
	pub mode: AddrMode,
}

impl ModeRule {
	const fn new(tokens: &'static [&'static str], mode: AddrMode) -> Self {
		Self { test: NameTest::Contains(tokens), mode }
	}

	const fn exact(name: &'static str, mode: AddrMode) -> Self {
		Self { test: NameTest::Exact(name), mode }
	}

	fn matches(&self, name: &str) -> bool {
		match self.test {
			NameTest::Exact(n)         => name == n,
			NameTest::Contains(tokens) => tokens.iter().all(|t| name.contains(t)),
		}
	}
}

use AddrMode::*;

// exact names first, then more specific tokens; first match wins.
const MOV_RULES: &[ModeRule] = &[
	ModeRule::new(&["IMM"],               Imm),
	ModeRule::new(&["ABSZP"],             AbsZp),
	ModeRule::new(&["ABS"],               Abs),
];

const MOVAT_RULES: &[ModeRule] = &[
	ModeRule::exact("MOVATABSIMMZP",      AbsImmZp),
	ModeRule::exact("MOVATABSIMM",        AbsImm),
	ModeRule::new(&["IMM"],               Imm),
	ModeRule::new(&["ABS", "ZP"],         AbsZp),
	ModeRule::new(&["ABS"],               Abs),
];

const ALU_RULES: &[ModeRule] = &[
	ModeRule::new(&["MEMZP"],             MemZp),
	ModeRule::new(&["MEM"],               Mem),
	ModeRule::new(&["STC"],               Stc),
];

const JUMP_RULES: &[ModeRule] = &[
	ModeRule::new(&["T"],                 T),
];

const REL_JUMP_RULES: &[ModeRule] = &[
	ModeRule::exact("JMPRELFUN",          Call),
	ModeRule::exact("JMPRELRET",          Ret),
	ModeRule::new(&["TL"],                Tl),
	ModeRule::new(&["T"],                 T),
];

const PUSH_RULES: &[ModeRule] = &[
	ModeRule::new(&["IMM"],               Imm),
	ModeRule::new(&["ABSZP"],             AbsZp),
	ModeRule::new(&["ABS"],               Abs),
];

const POP_RULES: &[ModeRule] = &[
	ModeRule::new(&["MEMZP"],             MemZp),
	ModeRule::new(&["MEM"],               Mem),
];

// ------------------------------------------------------------------------------------------------
// Family
// ------------------------------------------------------------------------------------------------

/// Mnemonic families. The first level of classification.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Family {
	/// `MOV`: register destination.
	Mov,
	/// `MOVAT`: memory destination.
	MovAt,
	/// `NEG, DIV2, INV, SHR, SHL`.
	Unary,
	/// `ADD, OR, AND, XOR`: operate on the data registers.
	Logic,
	/// `SUB`: like `Logic` but with explicit sources.
	Sub,
	/// `CMP`.
	Cmp,
	/// `CLR, INC, DEC`.
	Step,
	/// `JMPIMM`: absolute jumps, maybe conditional.
	Jump,
	/// `JMPREL`: relative jumps, maybe conditional, plus call and return.
	RelJump,
	/// `PUSH`.
	Push,
	/// `POP`.
	Pop,
	/// `NOP, SKIP, SKIP1, SKIP2, ISR, IRET, HALT`.
	Implied,
	/// Any other mnemonic with `INT` in it.
	Interrupt,
}

lazy_static! {
	static ref FAMILIES: HashMap<&'static str, Family> = {
		use Family::*;

		let mut m = HashMap::new();
		m.insert("MOV",    Mov);
		m.insert("MOVAT",  MovAt);
		m.insert("CMP",    Cmp);
		m.insert("SUB",    Sub);
		m.insert("JMPIMM", Jump);
		m.insert("JMPREL", RelJump);
		m.insert("PUSH",   Push);
		m.insert("POP",    Pop);

		for &mn in &["NEG", "DIV2", "INV", "SHR", "SHL"]                     { m.insert(mn, Unary);   }
		for &mn in &["ADD", "OR", "AND", "XOR"]                              { m.insert(mn, Logic);   }
		for &mn in &["CLR", "INC", "DEC"]                                    { m.insert(mn, Step);    }
		for &mn in &["NOP", "SKIP", "SKIP1", "SKIP2", "ISR", "IRET", "HALT"] { m.insert(mn, Implied); }
		m
	};
}

impl Family {
	/// Which family a mnemonic belongs to, if any.
	pub fn of(mnemonic: &str) -> Option<Family> {
		match FAMILIES.get(mnemonic) {
			Some(f)                             => Some(*f),
			None if mnemonic.contains("INT")    => Some(Family::Interrupt),
			None                                => None,
		}
	}

	/// The decision list used to infer an addressing mode from a name.
	pub fn mode_rules(self) -> &'static [ModeRule] {
		use Family::*;
		match self {
			Mov                  => MOV_RULES,
			MovAt                => MOVAT_RULES,
			Unary | Logic | Sub  => ALU_RULES,
			Jump                 => JUMP_RULES,
			RelJump              => REL_JUMP_RULES,
			Push                 => PUSH_RULES,
			Pop                  => POP_RULES,
			Cmp | Step | Implied | Interrupt => &[],
		}
	}

	/// The mode used when no rule matches.
	pub fn default_mode(self) -> AddrMode {
		use Family::*;
		// both enums have an `Implied`, so spell these out
		match self {
			Jump | RelJump       => AddrMode::Imm,
			Implied | Interrupt  => AddrMode::Implied,
			_                    => AddrMode::Reg,
		}
	}

	/// Infers the addressing mode from an instruction name.
	pub fn infer_mode(self, name: &str) -> AddrMode {
		self.mode_rules().iter()
			.find(|r| r.matches(name))
			.map(|r| r.mode)
			.unwrap_or_else(|| self.default_mode())
	}

	/// The assembly mnemonic for an instruction of this family in the given mode.
	pub fn spelling(self, mode: AddrMode, desc: &InstrDesc) -> String {
		use Family::*;
		let flag = desc.depend_on_flag.to_lowercase();

		match (self, mode) {
			(Mov, _) | (MovAt, _) => "mov".into(),
			(Cmp, _)              => "cmp".into(),
			(RelJump, Call)       => "call".into(),
			(RelJump, Ret)        => "ret".into(),
			(Jump, _)             => if flag.is_empty() { "jmp".into() } else { format!("j{}", flag) },
			(RelJump, _)          => format!("jr{}", flag),
			(Interrupt, _)        => desc.name.to_lowercase(),
			_                     => desc.mnemonic.to_lowercase(),
		}
	}
}
