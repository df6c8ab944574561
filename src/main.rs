use anyhow::Context;
use ecograph::similarity::report;
use ecograph::{load_knowledge_graph_file, CancelFlag, EntityKind, SimilarityEngine};

const DEFAULT_GRAPH: &str = "startup_knowledge_graph.json";
const TOP_N: usize = 10;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Ecograph similarity analysis v{}", ecograph::version());
    println!("==========================================");

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_GRAPH.to_string());
    let store = load_knowledge_graph_file(&path)
        .with_context(|| format!("failed to load knowledge graph from {}", path))?;

    let stats = store.statistics();
    println!(
        "Loaded graph: {} entities, {} relationships ({} isolated)",
        stats.entity_count, stats.relationship_count, stats.isolated_entities
    );

    let engine = SimilarityEngine::new(&store)?;
    let cancel = CancelFlag::new();

    for (kind, title) in [
        (EntityKind::Organization, "Organizations by shared technology"),
        (EntityKind::Fund, "Funds by shared portfolio"),
        (EntityKind::Person, "People by shared background"),
    ] {
        let scan = engine.all_pairs(kind, &cancel)?;
        println!();
        println!("=== Top {} most similar: {} ===", TOP_N, title);
        println!(
            "{} comparisons, {} nonzero pairs",
            scan.pairs_scored,
            scan.pairs.len()
        );
        let top = &scan.pairs[..scan.pairs.len().min(TOP_N)];
        println!("{}", report::format_table(&report::records(&store, top)));
    }

    Ok(())
}
