use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use numa_policy::{Admission, PolicyConfig, ProviderHintSet};
use tracing::info;

pub fn merge(
    hints_path: &Path,
    config_path: Option<&Path>,
    numa_nodes: Option<Vec<usize>>,
    format: &str,
) -> anyhow::Result<ExitCode> {
    let admission = evaluate(hints_path, config_path, numa_nodes)?;
    println!("{}", render(&admission, format)?);
    Ok(exit_code(&admission))
}

fn evaluate(
    hints_path: &Path,
    config_path: Option<&Path>,
    numa_nodes: Option<Vec<usize>>,
) -> anyhow::Result<Admission> {
    let config = resolve_config(config_path, numa_nodes)?;
    let policy = config.build_policy()?;
    let providers_hints = load_hints(hints_path)?;

    info!(
        policy = policy.name(),
        numa_nodes = ?config.numa_nodes,
        groups = providers_hints.len(),
        "evaluating topology hints"
    );
    Ok(policy.predicate(&providers_hints))
}

fn render(admission: &Admission, format: &str) -> anyhow::Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(admission)?),
        "text" => Ok(format_admission(admission)),
        other => anyhow::bail!("unknown output format: {other} (expected text or json)"),
    }
}

fn exit_code(admission: &Admission) -> ExitCode {
    if admission.admitted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Config file first, then the `--numa-nodes` override.
fn resolve_config(
    config_path: Option<&Path>,
    numa_nodes: Option<Vec<usize>>,
) -> anyhow::Result<PolicyConfig> {
    let mut config = match config_path {
        Some(path) => PolicyConfig::from_file(path)?,
        None => PolicyConfig::with_node_count(0),
    };
    if let Some(nodes) = numa_nodes {
        config.numa_nodes = nodes;
    }
    if config.numa_nodes.is_empty() {
        anyhow::bail!("no NUMA nodes given: pass --numa-nodes or a config with numa_nodes");
    }
    Ok(config)
}

fn load_hints(path: &Path) -> anyhow::Result<Vec<ProviderHintSet>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read hints from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse hints in {}", path.display()))
}

fn format_admission(admission: &Admission) -> String {
    let verdict = if admission.admitted { "admitted" } else { "rejected" };
    format!(
        "{verdict}: affinity={} preferred={} ({} candidates, {} discarded)",
        admission.hint.affinity, admission.hint.preferred, admission.evaluated, admission.discarded
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ADMITTED_HINTS: &str = r#"[
        {"cpu": [{"affinity": [0, 1], "preferred": false}, {"affinity": [0], "preferred": true}]},
        {"gpu": [{"affinity": [0, 1], "preferred": false}, {"affinity": [0], "preferred": true}]}
    ]"#;

    const REJECTED_HINTS: &str = r#"[
        {"cpu": [{"affinity": [0], "preferred": true}]},
        {"gpu": [{"affinity": [1], "preferred": true}]}
    ]"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn same_code(a: ExitCode, b: ExitCode) -> bool {
        format!("{a:?}") == format!("{b:?}")
    }

    #[test]
    fn numa_nodes_flag_overrides_config() {
        let file = write_temp("numa_nodes = [0, 1]");
        let config = resolve_config(Some(file.path()), Some(vec![0, 1, 2, 3])).unwrap();
        assert_eq!(config.numa_nodes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn config_file_used_without_flag() {
        let file = write_temp("policy = \"restricted\"\nnuma_nodes = [0, 1]");
        let config = resolve_config(Some(file.path()), None).unwrap();
        assert_eq!(config.numa_nodes, vec![0, 1]);
    }

    #[test]
    fn missing_numa_nodes_is_an_error() {
        assert!(resolve_config(None, None).is_err());
    }

    #[test]
    fn loads_provider_groups() {
        let file = write_temp(
            r#"[
                {"cpu": [{"affinity": [0, 1], "preferred": false}, {"affinity": [0], "preferred": true}]},
                {"gpu": [{"affinity": [0]}]}
            ]"#,
        );
        let groups = load_hints(file.path()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["cpu"].len(), 2);
        assert!(!groups[1]["gpu"][0].preferred);
    }

    #[test]
    fn rejects_out_of_range_affinity() {
        let file = write_temp(r#"[{"cpu": [{"affinity": [64], "preferred": true}]}]"#);
        assert!(load_hints(file.path()).is_err());
    }

    #[test]
    fn formats_verdict() {
        let file = write_temp(r#"[{"cpu": [{"affinity": [1], "preferred": true}]}]"#);
        let groups = load_hints(file.path()).unwrap();
        let policy = PolicyConfig::with_node_count(2).build_policy().unwrap();

        let text = format_admission(&policy.predicate(&groups));
        assert_eq!(text, "admitted: affinity=[1] preferred=true (1 candidates, 0 discarded)");
    }

    #[test]
    fn merge_exits_zero_when_admitted() {
        let hints = write_temp(ADMITTED_HINTS);
        let code = merge(hints.path(), None, Some(vec![0, 1]), "text").unwrap();
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn merge_exits_one_when_rejected() {
        let hints = write_temp(REJECTED_HINTS);
        let code = merge(hints.path(), None, Some(vec![0, 1]), "json").unwrap();
        assert!(same_code(code, ExitCode::FAILURE));
    }

    #[test]
    fn merge_reads_nodes_from_config() {
        let hints = write_temp(ADMITTED_HINTS);
        let config = write_temp("numa_nodes = [0, 1]");
        let code = merge(hints.path(), Some(config.path()), None, "text").unwrap();
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn merge_rejects_unknown_format() {
        let hints = write_temp(ADMITTED_HINTS);
        let err = merge(hints.path(), None, Some(vec![0, 1]), "yaml").unwrap_err();
        assert!(err.to_string().contains("unknown output format: yaml"));
    }

    #[test]
    fn json_output_carries_the_verdict() {
        let hints = write_temp(ADMITTED_HINTS);
        let admission = evaluate(hints.path(), None, Some(vec![0, 1])).unwrap();

        let json: serde_json::Value = serde_json::from_str(&render(&admission, "json").unwrap()).unwrap();
        assert_eq!(json["admitted"], true);
        assert_eq!(json["hint"]["affinity"], serde_json::json!([0]));
        assert_eq!(json["hint"]["preferred"], true);
        assert_eq!(json["evaluated"], 4);
    }

    #[test]
    fn rejected_verdict_renders_as_text() {
        let hints = write_temp(REJECTED_HINTS);
        let admission = evaluate(hints.path(), None, Some(vec![0, 1])).unwrap();

        assert!(!admission.admitted);
        assert!(same_code(exit_code(&admission), ExitCode::FAILURE));
        assert_eq!(
            render(&admission, "text").unwrap(),
            "rejected: affinity=[0 1] preferred=false (1 candidates, 1 discarded)"
        );
    }
}
