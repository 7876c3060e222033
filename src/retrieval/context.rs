//! Context assembly
//!
//! Concatenates retrieved passages into the prompt context, most relevant
//! first, each followed by its provenance. The context is bounded implicitly
//! by top-k and chunk size; the generation backend truncates or errors beyond
//! its own window. No distance-threshold filtering happens here - a relevance
//! gate is a caller-side policy, not part of assembly.

use super::RetrievalHit;

/// Assemble retrieved hits into a single prompt context
///
/// Preserves the ascending-distance order produced by the retriever. Each
/// entry is the chunk text followed by `(Source: <file>)`, with a blank line
/// between entries.
pub fn assemble_context(hits: &[RetrievalHit]) -> String {
    let mut context = String::new();
    for hit in hits {
        context.push_str(&hit.chunk.text);
        context.push_str(&format!("\n(Source: {})\n\n", hit.chunk.source_file));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexedChunk;

    fn hit(text: &str, source: &str, distance: f32) -> RetrievalHit {
        RetrievalHit {
            chunk: IndexedChunk {
                source_file: source.to_string(),
                chunk_index: 0,
                text: text.to_string(),
            },
            distance,
        }
    }

    #[test]
    fn test_empty_hits_empty_context() {
        assert_eq!(assemble_context(&[]), "");
    }

    #[test]
    fn test_single_hit_includes_text_and_source() {
        let context = assemble_context(&[hit("Insurance covers fire damage.", "a.json", 0.1)]);
        assert!(context.contains("Insurance covers fire damage."));
        assert!(context.contains("(Source: a.json)"));
    }

    #[test]
    fn test_order_preserved_most_relevant_first() {
        let context = assemble_context(&[
            hit("closest passage", "first.json", 0.1),
            hit("farther passage", "second.json", 0.9),
        ]);

        let close_pos = context.find("closest passage").unwrap();
        let far_pos = context.find("farther passage").unwrap();
        assert!(close_pos < far_pos);
    }

    #[test]
    fn test_entries_separated_by_blank_line() {
        let context = assemble_context(&[
            hit("alpha", "a.json", 0.1),
            hit("beta", "b.json", 0.2),
        ]);
        assert!(context.contains("(Source: a.json)\n\nbeta"));
    }
}
