use std::fs;
use std::path::PathBuf;
use std::process::Command;

use bbgen::{ generate, AddrMode, Catalog, GenErrorKind, Template };

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/bbcpu.json");

fn fixture() -> Catalog {
	Catalog::load(FIXTURE).unwrap()
}

#[test]
fn fixture_loads_in_order() {
	let catalog = fixture();
	assert_eq!(catalog.len(), 53);

	let descs: Vec<_> = catalog.iter().collect();
	assert_eq!(descs.first().unwrap().name, "NOP");
	assert_eq!(descs.last().unwrap().name, "HALT");

	let load = catalog.iter().find(|d| d.name == "LOADZPB").unwrap();
	assert_eq!(load.addr_mode, Some(AddrMode::AbsZp));
}

#[test]
fn whole_catalog() {
	let catalog = fixture();
	let out = generate(&catalog).unwrap();

	assert_eq!(out.opcodes, 53);
	assert_eq!(out.records.len(), 52);
	assert_eq!(out.diagnostics.len(), 1);
	assert_eq!(out.diagnostics[0].name, "MYSTERY");
	assert_eq!(out.diagnostics[0].kind, GenErrorKind::UnknownMnemonic { mnemonic: "FROB".into() });

	// every descriptor gets an opcode, skipped or not
	for desc in &catalog {
		let binding = format!("def OPC_{} : BBCPUOpcode<{}>;\n", desc.name, desc.opcode);
		assert!(out.text.contains(&binding), "no opcode for {}", desc.name);
	}

	// records come out in catalog order
	let names: Vec<_> = out.records.iter().map(|r| r.name.as_str()).collect();
	let expected: Vec<_> = catalog.iter()
		.map(|d| d.name.as_str())
		.filter(|&n| n != "MYSTERY")
		.collect();
	assert_eq!(names, expected);

	let mut last = 0;

	for r in &out.records {
		let def = format!("def {} : ", r.name);
		let at = out.text.find(&def).unwrap_or_else(|| panic!("no definition for {}", r.name));
		assert!(at > last, "{} is out of order", r.name);
		last = at;
	}
}

#[test]
fn selected_lines() {
	let text = generate(&fixture()).unwrap().text;

	let lines = [
		"def MOVTLA : BBCPUBinaryRegInstr<OPC_MOVTLA, TL, A, \"mov\", \"tl, a\">;\n",
		"def MOVATTA : BBCPUIndexedRegInstr<OPC_MOVATTA, AT_T, A, \"mov\">;\n",
		"def MOVATABSZPB : BBCPUMemZPRegInstr<OPC_MOVATABSZPB, B, \"mov\", \"$imm, b\">;\n",
		"def ADDMEMZP : BBCPUMemZPInstr<OPC_ADDMEMZP, (ins DR:$src1, DR:$src2), \"add\", \"$imm, $src1, $src2\">;\n",
		"def SUBSTCAB : BBCPUStcInstr<OPC_SUBSTCAB, A, B, \"sub\", \"$dst, a, b\">;\n",
		"def DIV2AA : BBCPUBinaryRegInstr<OPC_DIV2AA, A, A, \"div2\", \"a, a\">;\n",
		"def DIV2STCA : BBCPUStcRegInstr<OPC_DIV2STCA, A, \"div2\">;\n",
		"def CLRB : BBCPUSRegInstr<OPC_CLRB, B, \"clr\">;\n",
		"def JMPIMM : BBCPUJmpImmInstr<OPC_JMPIMM, \"jmp\">;\n",
		"def JMPT : BBCPUJmpRegInstr<OPC_JMPT, T, \"jmp\">;\n",
		"def JMPREL : BBCPURelJmpImmInstr<OPC_JMPREL, \"jr\">;\n",
		"def JMPRELTZ : BBCPURelJmpRegInstr<OPC_JMPRELTZ, T, \"jrz\">;\n",
		"def PUSHA : BBCPUSRegInstr<OPC_PUSHA, A, \"push\">;\n",
		"def PUSHABSZP : BBCPUSMemZPInstr<OPC_PUSHABSZP, \"push\">;\n",
		"def POPMEM : BBCPUMemInstr<OPC_POPMEM, (ins), \"pop\", \"$imm\">;\n",
		"def IRET : BBCPUNoopInstr<OPC_IRET, \"iret\">;\n",
		"def LOADZPB : BBCPURegMemZPInstr<OPC_LOADZPB, B, \"mov\", \"b, $imm\">;\n",
		"def HALT : BBCPUNoopInstr<OPC_HALT, \"halt\">;\n",
	];

	for line in &lines {
		assert!(text.contains(line), "missing: {}", line);
	}

	assert!(!text.contains("def MYSTERY"));
}

#[test]
fn sizes_follow_templates() {
	let out = generate(&fixture()).unwrap();

	for r in &out.records {
		let expected = match r.template {
			Template::ImmToMem | Template::ImmToMemZp               => 4,
			Template::RegMem | Template::Mem | Template::SMem
			| Template::MemReg | Template::MemBinaryReg | Template::JmpImm => 3,
			_ if r.template.desc().fields.is_empty()               => 1,
			_                                                       => 2,
		};

		assert_eq!(r.size(), expected, "{}", r.name);
	}
}

#[test]
fn command_line() {
	let dir: PathBuf = std::env::temp_dir().join(format!("bbgen-cli-{}", std::process::id()));
	fs::create_dir_all(&dir).unwrap();

	let status = Command::new(env!("CARGO_BIN_EXE_bbgen"))
		.arg("--config")
		.arg(FIXTURE)
		.current_dir(&dir)
		.status()
		.unwrap();
	assert!(status.success());

	let written = fs::read_to_string(dir.join("BBCPUInstrInfo.td")).unwrap();
	assert_eq!(written, generate(&fixture()).unwrap().text);

	// a missing catalog is an error and writes nothing
	let empty = dir.join("missing");
	fs::create_dir_all(&empty).unwrap();

	let status = Command::new(env!("CARGO_BIN_EXE_bbgen"))
		.arg("--config")
		.arg(empty.join("nope.json"))
		.current_dir(&empty)
		.status()
		.unwrap();
	assert!(!status.success());
	assert!(!empty.join("BBCPUInstrInfo.td").exists());

	fs::remove_dir_all(&dir).unwrap();
}
