//! Graphviz DOT projection of the state/transition table.

use super::machine::Machine;
use crate::error::Result;
use std::io::Write;

const DOT_HEADER: &str = "digraph StateDiagram {
    ratio=\"compress\";
    fontname=\"Arial\";
    label=\"\";
    node [
    height=\"1.00\";
    width=\"1.5\";
    shape=\"ellipse\";
    fixedsize=\"true\";
    fontsize=\"8\";
    fontname=\"Arial\";
];

    edge [
    fontsize=\"8\";
    fontname=\"Arial\";
];

";

fn quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Machine {
    /// Render every transition as a DOT edge, states in registration order
    /// and each state's transitions in registration order. Nodes and labels
    /// come from the translator.
    pub fn to_dot(&self) -> Result<String> {
        let inner = self.inner();
        inner.ensure_live()?;

        let def = inner.definition.borrow();
        let mut dot = String::from(DOT_HEADER);
        for state in &def.states {
            let from = quote(&inner.name(state.id()));
            for transition in state.transitions() {
                let to = if transition.next() == state.id() {
                    from.clone()
                } else {
                    quote(&inner.name(transition.next()))
                };
                let label = quote(&inner.name(transition.event()));
                dot.push_str(&format!(
                    "        \"{}\" -> \"{}\" [label=\"{}\"];\n",
                    from, to, label
                ));
            }
        }
        dot.push_str("}\n");
        Ok(dot)
    }

    /// Write [`to_dot`](Machine::to_dot) output to `writer`.
    pub fn export_graph<W: Write>(&self, writer: &mut W) -> Result<()> {
        let dot = self.to_dot()?;
        writer.write_all(dot.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
