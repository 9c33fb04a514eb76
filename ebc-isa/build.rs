// Build script for ebc-isa.
//
// Two phases:
//   1. Load and validate `isa.yaml` (duplicate values or mnemonics, values that
//      do not fit the 6-bit opcode field, unknown categories).
//   2. Generate `generated.rs`: the `Opcode` enum, `Opcode::from_raw`, and the
//      static `OPCODE_TABLE` consumed by `lookup` / `opcode_table`.

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Deserialize;

/// Must match `OPCODE_MASK` in `src/lib.rs`.
const OPCODE_MASK: u8 = 0x3F;

const CATEGORIES: &[&str] = &[
    "Arithmetic",
    "Comparison",
    "ControlFlow",
    "Move",
    "Stack",
    "Indirection",
    "System",
];

#[derive(Deserialize)]
struct IsaFile {
    opcodes: Vec<OpcodeDef>,
}

#[derive(Deserialize)]
struct OpcodeDef {
    mnemonic: String,
    variant: String,
    value: String,
    category: String,
}

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = env::var("OUT_DIR").unwrap();

    // Phase 1: load the table
    let isa_yaml = format!("{manifest}/isa.yaml");
    let text = std::fs::read_to_string(&isa_yaml)
        .unwrap_or_else(|e| panic!("failed to read {isa_yaml}: {e}"));
    let isa: IsaFile =
        serde_yaml::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {isa_yaml}: {e}"));

    let mut opcodes: Vec<(u8, OpcodeDef)> = isa
        .opcodes
        .into_iter()
        .map(|def| (parse_value(&def), def))
        .collect();
    validate(&opcodes);
    opcodes.sort_by_key(|(value, _)| *value);

    // Phase 2: emit Rust
    let code = generate(&opcodes);
    let out_path = PathBuf::from(&out_dir).join("generated.rs");
    std::fs::write(&out_path, code).expect("failed to write generated.rs");

    println!("cargo:rerun-if-changed=isa.yaml");
    println!("cargo:rerun-if-changed=build.rs");
}

fn parse_value(def: &OpcodeDef) -> u8 {
    let digits = def
        .value
        .strip_prefix("0x")
        .or_else(|| def.value.strip_prefix("0X"))
        .unwrap_or_else(|| panic!("{}: value {:?} is not a 0x literal", def.mnemonic, def.value));
    u8::from_str_radix(digits, 16)
        .unwrap_or_else(|e| panic!("{}: bad value {:?}: {e}", def.mnemonic, def.value))
}

fn validate(opcodes: &[(u8, OpcodeDef)]) {
    let mut values = HashSet::new();
    let mut mnemonics = HashSet::new();
    let mut variants = HashSet::new();

    for (value, def) in opcodes {
        assert!(
            value & !OPCODE_MASK == 0,
            "{}: value {value:#04x} overlaps the header flag bits",
            def.mnemonic
        );
        assert!(
            values.insert(*value),
            "duplicate opcode value {value:#04x} ({})",
            def.mnemonic
        );
        assert!(
            mnemonics.insert(def.mnemonic.as_str()),
            "duplicate mnemonic {}",
            def.mnemonic
        );
        assert!(
            variants.insert(def.variant.as_str()),
            "duplicate variant {}",
            def.variant
        );
        assert!(
            CATEGORIES.contains(&def.category.as_str()),
            "{}: unknown category {:?}",
            def.mnemonic,
            def.category
        );
    }
}

fn generate(opcodes: &[(u8, OpcodeDef)]) -> String {
    let mut out = String::new();
    out.push_str("// @generated by build.rs from isa.yaml. Do not edit.\n\n");

    out.push_str("/// EBC opcode, the low six bits of an instruction's first byte.\n");
    out.push_str("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    out.push_str("#[repr(u8)]\n");
    out.push_str("pub enum Opcode {\n");
    for (value, def) in opcodes {
        writeln!(out, "    /// `{}`", def.mnemonic).unwrap();
        writeln!(out, "    {} = {value:#04x},", def.variant).unwrap();
    }
    out.push_str("}\n\n");

    out.push_str("impl Opcode {\n");
    out.push_str("    /// Map a raw opcode value to its enum variant.\n");
    out.push_str("    pub const fn from_raw(raw: u8) -> Option<Self> {\n");
    out.push_str("        match raw {\n");
    for (value, def) in opcodes {
        writeln!(out, "            {value:#04x} => Some(Self::{}),", def.variant).unwrap();
    }
    out.push_str("            _ => None,\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    writeln!(
        out,
        "static OPCODE_TABLE: [OpcodeInfo; {}] = [",
        opcodes.len()
    )
    .unwrap();
    for (_, def) in opcodes {
        writeln!(
            out,
            "    OpcodeInfo {{ opcode: Opcode::{}, mnemonic: {:?}, category: OpcodeCategory::{} }},",
            def.variant, def.mnemonic, def.category
        )
        .unwrap();
    }
    out.push_str("];\n");

    out
}
