use crate::error::Result;
use itcsim::core::energy::ModelKind;
use std::fmt::Write;

pub fn run() -> Result<()> {
    print!("{}", render());
    Ok(())
}

/// One block per energy model: name, extrapolation support, description and parameter order.
fn render() -> String {
    let mut out = String::new();
    for kind in ModelKind::ALL {
        let extrapolation = if kind.supports_extrapolation() {
            ""
        } else {
            " (no temperature extrapolation)"
        };
        let _ = writeln!(out, "{kind}{extrapolation}");
        let _ = writeln!(out, "    {}", kind.description());
        let _ = writeln!(
            out,
            "    parameters ({}): {}",
            kind.arity(),
            kind.parameter_names().join(", ")
        );
        out.push('\n');
    }
    out
}
