use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

const CONTRACT: &str = "CONDIZIONI TECNICO ECONOMICHE
Nome Offerta: Luce Verde Flex
Cod. Offerta: 011234LVF01XXLUCEVERDE2025
PREZZO OFFERTA
PUN + 0,06 €/kWh
Il prezzo della componente energia è pari a 0,12500 €/kWh in fascia F0,
pari a 0,14000 €/kWh in fascia F1, pari a 0,13000 €/kWh in fascia F2,
pari a 0,11000 €/kWh in fascia F3 e pari a 0,12000 €/kWh in fascia F23.
Comm.ne fissa, pari a 12,50 €/mese
Contributo Mensile, pari a 5,00 €/mese
Programmazione Prelievi, pari a 0,02 €/kWh
Comm.ne Variabile, pari a 0,015 €/kWh
";

const REFERENCE_TARIFF: &str = r#"{
  "offerName": "Energy Smart Casa 2025",
  "offerCode": "027909ESVML01XXENERGYSMARTER2025",
  "priceFormula": "PUN + 0,05 €/kWh",
  "fixedFees": { "monthlyFee": 11.0, "contributionFee": 6.0 },
  "variableFees": { "programmationFee": 0.01, "variableCommission": 0.01 },
  "punRates": { "F0": 0.13089, "F1": 0.14559, "F2": 0.13738, "F3": 0.11713, "F23": 0.12442 }
}"#;

/// Workspace with an empty config so the user's own config is never read.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{}").unwrap();
        Self { dir }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bolletta").unwrap();
        cmd.arg("-c").arg(self.dir.path().join("config.json"));
        cmd
    }
}

#[test]
fn extract_reads_contract_text() {
    let ws = Workspace::new();
    let contract = ws.file("contract.txt", CONTRACT);

    ws.cmd()
        .arg("extract")
        .arg(&contract)
        .assert()
        .success()
        .stdout(predicate::str::contains("Luce Verde Flex"))
        .stdout(predicate::str::contains("\"monthlyFee\": 12.5"));
}

#[test]
fn extract_text_format_lists_fields() {
    let ws = Workspace::new();
    let contract = ws.file("contract.txt", CONTRACT);

    ws.cmd()
        .args(["extract", "--format", "text"])
        .arg(&contract)
        .assert()
        .success()
        .stdout(predicate::str::contains("12 of 12 fields extracted"));
}

#[test]
fn extract_strict_rejects_defaulted_fields() {
    let ws = Workspace::new();
    let contract = ws.file("blank.txt", "nothing to see here");

    ws.cmd()
        .args(["extract", "--strict"])
        .arg(&contract)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fell back"));
}

#[test]
fn extract_missing_file_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("extract")
        .arg(ws.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn calculate_json_from_stored_tariff() {
    let ws = Workspace::new();
    let tariff = ws.file("tariff.json", REFERENCE_TARIFF);

    ws.cmd()
        .arg("calculate")
        .arg("--tariff")
        .arg(&tariff)
        .args(["--f0", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"consumption\""))
        .stdout(predicate::str::contains("445.08"));
}

#[test]
fn calculate_text_report_includes_gas() {
    let ws = Workspace::new();
    let tariff = ws.file("tariff.json", REFERENCE_TARIFF);

    ws.cmd()
        .arg("calculate")
        .arg("--tariff")
        .arg(&tariff)
        .args(["--gas", "50", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Gas: 50,00 €"))
        .stdout(predicate::str::contains("Total Monthly Cost: 67,00 €"))
        .stdout(predicate::str::contains("Generated on: "));
}

#[test]
fn calculate_flags_override_consumption_file() {
    let ws = Workspace::new();
    let tariff = ws.file("tariff.json", REFERENCE_TARIFF);
    let consumption = ws.file("usage.json", r#"{ "electricityF0": 40, "gas": 10 }"#);

    ws.cmd()
        .arg("calculate")
        .arg("--tariff")
        .arg(&tariff)
        .arg("--consumption")
        .arg(&consumption)
        .args(["--f0", "100", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offer_name,electricity_f0"))
        .stdout(predicate::str::contains("Energy Smart Casa 2025,20.09,"));
}

#[test]
fn batch_writes_tariffs_and_summary() {
    let ws = Workspace::new();
    ws.file("a.txt", CONTRACT);
    ws.file("b.txt", "no terms here");
    let out = ws.path().join("out");

    ws.cmd()
        .arg("batch")
        .arg(format!("{}/*.txt", ws.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success();

    let tariff = fs::read_to_string(out.join("a.tariff.json")).unwrap();
    assert!(tariff.contains("Luce Verde Flex"));
    assert!(out.join("b.tariff.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,offer_name"));
    assert!(summary.contains("a.txt,success,Luce Verde Flex"));
}

#[test]
fn batch_keeps_same_stem_outputs_apart() {
    let ws = Workspace::new();
    ws.file("a.txt", CONTRACT);
    ws.file("a.pdf", "not really a pdf");
    let out = ws.path().join("out");

    ws.cmd()
        .arg("batch")
        .arg(format!("{}/a.*", ws.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let from_pdf = fs::read_to_string(out.join("a.tariff.json")).unwrap();
    let from_text = fs::read_to_string(out.join("a-2.tariff.json")).unwrap();
    assert!(from_pdf.contains("Energy Smart Casa 2025"));
    assert!(from_text.contains("Luce Verde Flex"));
}

#[test]
fn config_commands_use_given_path() {
    let ws = Workspace::new();
    let config = ws.path().join("config.json");

    ws.cmd()
        .args(["config", "set", "extraction.strict", "true"])
        .assert()
        .success();

    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains("\"strict\": true"));

    ws.cmd()
        .args(["config", "get", "extraction.strict"])
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));

    ws.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}
