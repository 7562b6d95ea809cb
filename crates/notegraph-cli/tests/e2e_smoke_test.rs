use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use notegraph_cli::{Args, run};

/// Workspace-level directory holding the demo payloads
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        diagram: None,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_json_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No demo payloads found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_dir = temp_dir
            .path()
            .join(demo_path.file_stem().unwrap().to_string_lossy().to_string());

        match run(&args_for(demo_path, &output_dir)) {
            Ok(written) => {
                assert!(!written.is_empty(), "{} wrote nothing", demo_path.display());
                for path in written {
                    let svg = fs::read_to_string(&path).expect("written file is readable");
                    assert!(svg.starts_with("<svg"), "{} is not SVG", path.display());
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_json_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error payloads found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        if run(&args_for(demo_path, temp_dir.path())).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_files_are_named_by_index_and_title() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("data_structures.json");

    let written = run(&args_for(&input, temp_dir.path())).expect("demo should render");
    let names: Vec<_> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(
        names,
        vec!["0-binary-search-tree.svg", "1-singly-linked-list.svg"]
    );
}

#[test]
fn e2e_single_diagram_selection() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("network_topology.json");

    let mut args = args_for(&input, temp_dir.path());
    args.diagram = Some(2);
    let written = run(&args).expect("demo should render");
    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with("2-file-system-hierarchy.svg"));

    args.diagram = Some(3);
    assert!(run(&args).is_err(), "index past the end must be rejected");
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[style]\nbackground_color = \"#fafafa\"\n").unwrap();

    let mut args = args_for(&demos_dir().join("request_flow.json"), &temp_dir.path().join("out"));
    args.config = Some(config_path.to_string_lossy().to_string());

    let written = run(&args).expect("demo should render");
    let svg = fs::read_to_string(&written[0]).unwrap();
    assert!(svg.contains("<rect"), "background should be drawn");
}
