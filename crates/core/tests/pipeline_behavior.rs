mod common;

use common::{ContextBuilder, MethodBuilder, call, completion_on, declare};
use usagescope_api::Context;
use usagescope_core::{CompletionStage, ExtractionPipeline, FullMiningStage, PipelineStats};

fn unit_with_marker(class: &str) -> Context {
    ContextBuilder::new(class)
        .method(
            MethodBuilder::new(class, "run")
                .statement(declare("w", "org.acme.Widget"))
                .statement(call("w", "org.acme.Widget", "show"))
                .statement(completion_on("w"))
                .build(),
        )
        .build()
}

fn unit_without_marker(class: &str) -> Context {
    ContextBuilder::new(class)
        .method(
            MethodBuilder::new(class, "run")
                .statement(declare("w", "org.acme.Widget"))
                .build(),
        )
        .build()
}

fn malformed_unit(class: &str) -> Context {
    ContextBuilder::new(class)
        .method(
            MethodBuilder::new(class, "run")
                .statement(declare("w", "org.acme.Widget"))
                .statement(declare("w", "org.acme.Panel"))
                .build(),
        )
        .build()
}

#[test]
fn test_chunks_commit_separately_in_unit_order() {
    let units: Vec<Context> = (0..5)
        .map(|i| unit_with_marker(&format!("org.acme.C{i}")))
        .collect();

    let pipeline = ExtractionPipeline::new(2);
    let mut commits: Vec<Vec<String>> = Vec::new();
    let stats = pipeline
        .execute(&units, &CompletionStage, |queries| {
            commits.push(
                queries
                    .iter()
                    .map(|query| query.class_context.to_string())
                    .collect(),
            );
            Ok(())
        })
        .unwrap();

    assert_eq!(stats.extracted, 5);
    assert_eq!(
        commits,
        vec![
            vec!["org.acme.C0".to_string(), "org.acme.C1".to_string()],
            vec!["org.acme.C2".to_string(), "org.acme.C3".to_string()],
            vec!["org.acme.C4".to_string()],
        ]
    );
}

#[test]
fn test_malformed_units_only_cost_themselves() {
    let units = vec![
        unit_with_marker("org.acme.A"),
        malformed_unit("org.acme.B"),
        unit_without_marker("org.acme.C"),
        unit_with_marker("org.acme.D"),
    ];

    let pipeline = ExtractionPipeline::new(0);
    let mut committed = Vec::new();
    let stats = pipeline
        .execute(&units, &CompletionStage, |queries| {
            committed.extend(queries);
            Ok(())
        })
        .unwrap();

    assert_eq!(
        stats,
        PipelineStats {
            extracted: 2,
            empty: 1,
            failed: 1
        }
    );
    let classes: Vec<&str> = committed
        .iter()
        .map(|query| query.class_context.as_str())
        .collect();
    assert_eq!(classes, vec!["org.acme.A", "org.acme.D"]);
}

#[test]
fn test_full_mining_commits_seeded_and_declared_records() {
    let units = vec![unit_without_marker("org.acme.A")];

    let pipeline = ExtractionPipeline::new(0);
    let mut committed = Vec::new();
    let stats = pipeline
        .execute(&units, &FullMiningStage, |queries| {
            committed.extend(queries);
            Ok(())
        })
        .unwrap();

    assert_eq!(stats.extracted, 2);
    let types: Vec<&str> = committed
        .iter()
        .map(|query| query.object_type.as_str())
        .collect();
    assert_eq!(types, vec!["org.acme.A", "org.acme.Widget"]);
}

#[test]
fn test_logging_writes_rolling_file_per_component() {
    let dir = tempfile::tempdir().unwrap();
    let guard = usagescope_core::logging::init_logging_in(dir.path(), "miner", false);

    tracing::info!("pipeline run starting");
    let units = vec![malformed_unit("org.acme.Broken")];
    ExtractionPipeline::new(0)
        .execute(&units, &CompletionStage, |_| Ok(()))
        .unwrap();
    drop(guard);

    let mut log_files: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    log_files.sort();
    assert_eq!(log_files.len(), 1);
    assert!(log_files[0].starts_with("miner."));

    let content = std::fs::read_to_string(dir.path().join(&log_files[0])).unwrap();
    assert!(content.contains("pipeline run starting"));
    assert!(content.contains("org.acme.Broken"));
}
