use std::path::Path;
use std::process::{Command, Output};

const RAW: &str = "unit,sex,age,geo\\time\t2021 \t2020 \n\
                   YR,F,Y_LT1,PT\t81.5\t80.9 e\n";

fn run_clean(data_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_life-expectancy"))
        .args(["clean", "--country", "pt", "--data-dir"])
        .arg(data_dir)
        .current_dir(data_dir)
        .env_remove("LIFE_EXPECTANCY_DATA_DIR")
        .env_remove("LIFE_EXPECTANCY_COUNTRY")
        .output()
        .unwrap()
}

#[test]
fn test_clean_success_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("eu_life_expectancy_raw.tsv"), RAW).unwrap();

    let output = run_clean(dir.path());

    assert!(output.status.success());
    let written = std::fs::read_to_string(dir.path().join("pt_life_expectancy.csv")).unwrap();
    assert_eq!(
        written,
        "unit,sex,age,region,year,value\nYR,F,Y_LT1,PT,2021,81.5\nYR,F,Y_LT1,PT,2020,80.9\n"
    );
}

#[test]
fn test_malformed_key_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("eu_life_expectancy_raw.tsv"), "key\t2020\nYR,F,PT\t81\n").unwrap();

    let output = run_clean(dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr: {}", stderr);
    assert!(stderr.contains("malformed key"), "stderr: {}", stderr);
    assert!(!dir.path().join("pt_life_expectancy.csv").exists());
}

#[test]
fn test_missing_input_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_clean(dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr: {}", stderr);
    assert!(stderr.contains("eu_life_expectancy_raw.tsv"), "stderr: {}", stderr);
    assert!(!dir.path().join("pt_life_expectancy.csv").exists());
}
