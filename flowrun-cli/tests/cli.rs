use assert_cmd::Command;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    std::io::Write::write_all(&mut f, contents.as_bytes()).expect("write");
    f
}

fn flowrun() -> Command {
    let mut cmd = Command::cargo_bin("flowrun").expect("binary");
    cmd.env_remove("RUST_LOG").env_remove("FLOWRUN_LOG");
    cmd
}

const ALERT_GRAPH: &str = r#"
id: temperature-alert
name: Temperature Alert
nodes:
  - id: start
    type: start
  - id: form
    type: form
    data:
      metadata:
        outputVariables: [name, city, temperature]
  - id: check
    type: condition
  - id: email
    type: email
    data:
      metadata:
        emailTemplate:
          subject: "Alert for {{city}}"
          body: "{{name}}, it is {{temperature}}°C in {{city}}"
  - id: end
    type: end
edges:
  - { source: start, target: form }
  - { source: form, target: check }
  - { source: check, target: email, sourceHandle: "true" }
  - { source: check, target: end, sourceHandle: "false" }
  - { source: email, target: end }
"#;

fn run_json(graph: &NamedTempFile, extra: &[&str]) -> (i32, serde_json::Value) {
    let path = graph.path().to_string_lossy().to_string();
    let mut args = vec!["run", path.as_str(), "--format", "json"];
    args.extend_from_slice(extra);
    let out = flowrun().args(&args).output().expect("run");
    let value = serde_json::from_slice(&out.stdout).unwrap_or(serde_json::Value::Null);
    (out.status.code().unwrap_or(-1), value)
}

fn node_ids(result: &serde_json::Value) -> Vec<String> {
    result["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["nodeId"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn validate_accepts_well_formed_graph() {
    let f = write_temp(ALERT_GRAPH);
    flowrun()
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .success()
        .stdout(predicates::str::contains("ok: valid workflow graph"));
}

#[test]
fn validate_rejects_cycles_with_code_2() {
    let f = write_temp(
        r#"{"nodes":[{"id":"s","type":"start"},{"id":"a","type":"form"},{"id":"b","type":"form"}],
            "edges":[{"source":"s","target":"a"},{"source":"a","target":"b"},{"source":"b","target":"a"}]}"#,
    );
    flowrun()
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("cycle detected involving nodes: a, b"));
}

#[test]
fn run_sends_alert_when_condition_met() {
    let f = write_temp(ALERT_GRAPH);
    let (code, result) = run_json(
        &f,
        &[
            "--set", "name=Alice",
            "--set", "city=Sydney",
            "--set", "temperature=30",
            "--operator", "greater_than",
            "--threshold", "25",
        ],
    );

    assert_eq!(code, 0);
    assert_eq!(result["status"], "completed");
    assert_eq!(result["workflowId"], "temperature-alert");
    assert_eq!(node_ids(&result), ["start", "form", "check", "email", "end"]);
    let email = &result["steps"][3];
    assert_eq!(email["output"]["emailDraft"]["body"], "Alice, it is 30°C in Sydney");
}

#[test]
fn run_takes_false_branch_below_threshold() {
    let f = write_temp(ALERT_GRAPH);
    let inputs = write_temp(
        "formData:\n  name: Bob\n  city: Melbourne\n  temperature: 12.5\ncondition:\n  operator: greater_than\n  threshold: 25\n",
    );
    let inputs_path = inputs.path().to_string_lossy().to_string();
    let (code, result) = run_json(&f, &["--inputs", inputs_path.as_str()]);

    assert_eq!(code, 0);
    assert_eq!(node_ids(&result), ["start", "form", "check", "end"]);
    assert_eq!(result["steps"][2]["output"]["conditionMet"], false);
}

#[test]
fn run_without_condition_reports_failed_step_with_code_3() {
    let f = write_temp(ALERT_GRAPH);
    let (code, result) = run_json(&f, &["--set", "temperature=30"]);

    assert_eq!(code, 3);
    assert_eq!(result["status"], "failed");
    assert_eq!(result["steps"][2]["status"], "failed");
    assert_eq!(result["steps"][2]["error"], "condition configuration is missing");
    assert_eq!(result["steps"][2]["output"]["message"], "Failed to evaluate condition");
}

#[test]
fn run_refuses_invalid_graph_unless_asked() {
    let f = write_temp(r#"{"nodes":[{"id":"s","type":"start"},{"id":"x","type":"webhook"}],"edges":[{"source":"s","target":"x"}]}"#);
    let path = f.path().to_string_lossy().to_string();

    flowrun()
        .args(["run", path.as_str()])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported node type 'webhook'"));

    let (code, result) = run_json(&f, &["--no-validate"]);
    assert_eq!(code, 0);
    assert_eq!(node_ids(&result), ["s", "x"]);
}

#[test]
fn run_without_start_node_fails_even_unvalidated() {
    let f = write_temp(r#"{"nodes":[{"id":"e","type":"end"}]}"#);
    let path = f.path().to_string_lossy().to_string();
    flowrun()
        .args(["run", path.as_str(), "--no-validate"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("no start node found in workflow"));
}

#[test]
fn inspect_lists_reachability() {
    let f = write_temp(
        r#"{"nodes":[{"id":"s","type":"start"},{"id":"a","type":"end"},{"id":"orphan","type":"end"}],
            "edges":[{"source":"s","target":"a"}]}"#,
    );
    let out = flowrun()
        .args(["inspect", f.path().to_string_lossy().as_ref(), "--format", "json"])
        .output()
        .expect("inspect");
    assert_eq!(out.status.code(), Some(0));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["start"], "s");
    assert_eq!(v["reachable"], serde_json::json!(["s", "a"]));
    assert_eq!(v["unreachable"], serde_json::json!(["orphan"]));
    assert_eq!(v["nodes"][0]["out_degree"], 1);
}

#[test]
fn missing_file_is_a_runtime_error() {
    flowrun()
        .args(["validate", "/definitely/not/here.yaml"])
        .assert()
        .code(4);
}
