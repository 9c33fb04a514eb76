use ebc_testgen::*;

/// Parse and assemble a document that must be well formed.
pub fn assemble_all(document: &str) -> Vec<(TestCase, AssembledInstruction)> {
    parse(document)
        .unwrap()
        .into_iter()
        .map(|case| {
            let instr = assemble(&case).unwrap();
            (case, instr)
        })
        .collect()
}

/// Run `generate` into memory, returning the output even when the run fails.
pub fn generate_to_string(
    document: &str,
    style: FragmentStyle,
) -> (String, Result<Summary, GenerateError>) {
    let mut out = Vec::new();
    let result = generate(document, &mut out, &GenerateOptions { style });
    (String::from_utf8(out).unwrap(), result)
}
