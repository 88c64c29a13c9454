//! TableGen text that doesn't depend on the catalog.

// ------------------------------------------------------------------------------------------------
// Operand classes
// ------------------------------------------------------------------------------------------------

pub(super) const OPERAND_CLASSES: &str = r#"//===-- BBCPUInstrInfo.td - BBCPU Instruction defs ---------*- tablegen -*-===//
//
// Part of the LLVM Project, under the Apache License v2.0 with LLVM Exceptions.
// See https://llvm.org/LICENSE.txt for license information.
// SPDX-License-Identifier: Apache-2.0 WITH LLVM-exception
//
//===----------------------------------------------------------------------===//
//
// This file describes the BBCPU instructions in TableGen format.
//
//===----------------------------------------------------------------------===//

//===----------------------------------------------------------------------===//
// Operand and SDNode transformation definitions
//===----------------------------------------------------------------------===//

def MemOperandClass : AsmOperandClass {
    let Name = "Mem";
}

def MemZeroPageOperandClass : AsmOperandClass {
    let Name = "MemZeroPage";
}

def IndexedRegOperandClass : AsmOperandClass {
    let Name = "IndexedReg";
}

def StackOperandClass : AsmOperandClass {
    let Name = "Stack";
}

def imm8 : Operand<i8> {
    let EncoderMethod = "encodeImm<MCFixupKind::FK_Data_1, 1>";
}

def imm16 : Operand<i16> {
    let EncoderMethod = "encodeImm<MCFixupKind::FK_Data_2, 1>";
}

def mem : Operand<i16> {
    let ParserMatchClass = MemOperandClass;
    let OperandType = "OPERAND_MEMORY";
    let MIOperandInfo = (ops i16imm);
    let EncoderMethod = "encodeImm<MCFixupKind::FK_Data_2, 1>";
}

def memzp : Operand<i8> {
    let ParserMatchClass = MemZeroPageOperandClass;
    let OperandType = "OPERAND_MEMORY";
    let MIOperandInfo = (ops i8imm);
    let EncoderMethod = "encodeImm<MCFixupKind::FK_Data_1, 1>";
}

def relimm8 : Operand<i8> {
    let EncoderMethod = "encodeImm<MCFixupKind::FK_PCRel_1, 1>";
}

class IndexedReg<Register reg> : Operand<OtherVT> {
    field Register Reg = reg;

    let OperandType = "OPERAND_REGISTER";
    let ParserMatchClass = IndexedRegOperandClass;
}

def stc : Operand<i8> {
    let ParserMatchClass = StackOperandClass;
    let OperandType = "OPERAND_MEMORY";
    let MIOperandInfo = (ops i8imm);
}
"#;

// ------------------------------------------------------------------------------------------------
// Opcode preamble
// ------------------------------------------------------------------------------------------------

pub(super) const OPCODE_PREAMBLE: &str = r#"
//===----------------------------------------------------------------------===//
// Opcode and Instruction definitions
//===----------------------------------------------------------------------===//

// Following opcodes names and values match those defined in the manual
// (see https://kn-breadboard-computing.github.io/proc-instr/)
class BBCPUOpcode<bits<8> val> {
    bits<8> Value = val;
}

"#;

// ------------------------------------------------------------------------------------------------
// Base instruction class
// ------------------------------------------------------------------------------------------------

/// `BBCPUInstr` plus the indexed-register operands. Goes before the generated template classes.
pub(super) const BASE_CLASSES: &str = r#"
class BBCPUInstr<dag outs, dag ins, string opcodestr, string argstr, list<dag> pattern> : Instruction {
    let Namespace = "BBCPU";

    field bits<32> Inst;
    let Size = 1;

    bits<8> Opcode = 0;
    let Inst{7-0} = Opcode;

    dag OutOperandList = outs;
    dag InOperandList = ins;
    let AsmString = opcodestr # " " # argstr;
    let Pattern = pattern;
}

foreach reg = [A, B, TL, TH, T] in {
  def Indexed#reg#RegOpClass : AsmOperandClass {
    let Name = !strconcat("Indexed", reg.AsmName, "Reg");
    let RenderMethod = "addIndexedRegOperands";
    let PredicateMethod = "isIndexedRegOf<BBCPU::" # reg # ">";
    let SuperClasses = [IndexedRegOperandClass];
  }

  def AT_#reg : IndexedReg<reg> {
    let ParserMatchClass = !cast<AsmOperandClass>("Indexed" # reg # "RegOpClass");
  }
}

"#;

// ------------------------------------------------------------------------------------------------
// Aliases
// ------------------------------------------------------------------------------------------------

pub(super) const ALIASES: &str = r#"
//===----------------------------------------------------------------------===//
// Instruction aliases
//===----------------------------------------------------------------------===//
def ASRAA : InstAlias<"asr a, a", (DIV2AA)>;
def ASRAB : InstAlias<"asr a, b", (DIV2AB)>;
def ASRBA : InstAlias<"asr b, a", (DIV2BA)>;
def ASRBB : InstAlias<"asr b, b", (DIV2BB)>;
def ASRMEMA : InstAlias<"asr $dst, a", (DIV2MEMA mem:$dst)>;
def ASRMEMB : InstAlias<"asr $dst, b", (DIV2MEMB mem:$dst)>;
def ASRMEMZPA : InstAlias<"asr $dst, a", (DIV2MEMZPA memzp:$dst)>;
def ASRMEMZPB : InstAlias<"asr $dst, b", (DIV2MEMZPB memzp:$dst)>;
def ASRSTCA : InstAlias<"asr $dst, a", (DIV2STCA stc:$dst)>;
def ASRSTCB : InstAlias<"asr $dst, b", (DIV2STCB stc:$dst)>;
"#;
