use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Isolated project directory with the sample uploads next to it.
struct InsidersTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl InsidersTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        for name in ["ecommerce_correct.csv", "ecommerce_wrong.csv"] {
            fs::copy(fixtures.join(name), root.join(name))?;
        }
        Ok(Self { _tmp: tmp, root })
    }

    fn write_config(&self, yaml: &str) -> Result<()> {
        fs::write(self.root.join("insiders.yaml"), yaml)?;
        Ok(())
    }

    fn insiders(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("insiders"));
        cmd.current_dir(&self.root)
            .env_remove("INSIDERS_STRICT_SCHEMA")
            .env_remove("INSIDERS_LOG_DIR")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_correct_upload_is_approved() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.insiders()
        .args(["validate", "ecommerce_correct.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Well done!"))
        .stdout(predicate::str::contains("approved by the data validator"));
    Ok(())
}

#[test]
fn test_wrong_upload_is_rejected_with_catalog_message() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.insiders()
        .args(["validate", "ecommerce_wrong.csv"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Please check the \"Quantity\" column and try again...",
        ))
        .stdout(predicate::str::contains("contact the administrator"))
        .stdout(predicate::str::contains("12 pcs").not());
    Ok(())
}

#[test]
fn test_json_report_is_written() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.insiders()
        .args(["validate", "ecommerce_correct.csv", "--output", "report.json"])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.root.join("report.json"))?)?;
    assert_eq!(report["verdict"]["status"], "admissible");
    assert_eq!(report["rows_read"], 5);
    assert_eq!(report["rows_admitted"], 4);
    assert_eq!(report["checks_passed"].as_array().map(Vec::len), Some(8));

    env.insiders()
        .args(["validate", "ecommerce_wrong.csv", "-o", "rejected.json"])
        .assert()
        .code(1);
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.root.join("rejected.json"))?)?;
    assert_eq!(report["verdict"]["status"], "inadmissible");
    assert_eq!(report["verdict"]["check"], "quantity");
    assert_eq!(report["failure"]["kind"], "type");
    Ok(())
}

#[test]
fn test_validate_reads_stdin() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    let upload = fs::read(env.root.join("ecommerce_correct.csv"))?;
    assert_cmd::Command::from_std(env.insiders())
        .args(["validate", "-"])
        .write_stdin(upload)
        .assert()
        .success()
        .stdout(predicate::str::contains("Well done!"));
    Ok(())
}

#[test]
fn test_strict_schema_from_config_and_flag() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    let extra = "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country,Channel\n\
                 557625,20724R,BAG,10,19-Jun-17,0.85,15159,United Kingdom,web\n";
    fs::write(env.root.join("extra.csv"), extra)?;

    env.insiders()
        .args(["validate", "extra.csv"])
        .assert()
        .success();

    env.insiders()
        .args(["validate", "extra.csv", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Please check the column names"));

    env.write_config("name: shop\nvalidation:\n  strict_schema: true\n")?;
    env.insiders()
        .args(["validate", "extra.csv"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_missing_input_fails() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.insiders()
        .args(["validate", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File System Error"));
    Ok(())
}

#[test]
fn test_broken_config_names_the_project_dir() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.write_config("validation: [unclosed\n")?;
    env.insiders()
        .args(["validate", "ecommerce_correct.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load project config from ."))
        .stderr(predicate::str::contains("YAML Parsing Error"));
    Ok(())
}

#[test]
fn test_schema_help() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.insiders()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("InvoiceDate"))
        .stdout(predicate::str::contains("Customer number"))
        .stdout(predicate::str::contains("19-Jun-17"));
    Ok(())
}

#[test]
fn test_report_without_job_section_fails() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.insiders()
        .args(["report", "--exit-code", "0", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No 'job' section"));
    Ok(())
}

#[test]
fn test_report_dry_run_prints_latest_log() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.write_config("job:\n  command: papermill\n  log_dir: logs\n")?;
    fs::create_dir(env.root.join("logs"))?;
    fs::write(env.root.join("logs/2024-01-01.log"), "INFO old run\n")?;
    fs::write(env.root.join("logs/2024-01-08.log"), "INFO clustering done\n")?;

    env.insiders()
        .args(["report", "--exit-code", "0", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insiders log: SUCCESSFUL"))
        .stdout(predicate::str::contains("INFO clustering done"))
        .stdout(predicate::str::contains("old run").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_job_dry_run_reports_failure() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.write_config(
        "job:\n  command: sh\n  args: ['-c', 'mkdir -p logs && echo \"ERROR model crashed\" > logs/run.log && exit 3']\n",
    )?;

    env.insiders()
        .args(["job", "--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Insiders log: FAILED"))
        .stdout(predicate::str::contains("ERROR model crashed"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_job_dry_run_reports_success() -> Result<()> {
    let env = InsidersTestEnv::new()?;
    env.write_config(
        "job:\n  command: sh\n  args: ['-c', 'mkdir -p logs && echo \"INFO done\" > logs/run.log']\n",
    )?;

    env.insiders()
        .args(["job", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insiders log: SUCCESSFUL"));
    Ok(())
}
