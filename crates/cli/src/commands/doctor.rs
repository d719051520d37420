use serde::Serialize;

use tienda_core::config::{AppConfig, LoadOptions};
use tienda_core::domain::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                error.to_string().replace('"', "\\\"")
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_data_file(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "data_file",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_fine = checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_fine { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_fine {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_data_file(config: &AppConfig) -> DoctorCheck {
    let path = &config.storage.data_file;

    if !path.exists() {
        // Not a failure: the server seeds the sample catalog on first run.
        return DoctorCheck {
            name: "data_file",
            status: CheckStatus::Pass,
            details: format!(
                "data file `{}` absent, will be seeded on first run",
                path.display()
            ),
        };
    }

    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(error) => {
            return DoctorCheck {
                name: "data_file",
                status: CheckStatus::Fail,
                details: format!("could not read `{}`: {error}", path.display()),
            };
        }
    };

    match serde_json::from_slice::<Vec<Product>>(&raw) {
        Ok(products) => {
            let active = products.iter().filter(|product| product.is_active).count();
            DoctorCheck {
                name: "data_file",
                status: CheckStatus::Pass,
                details: format!(
                    "data file parsed ({} products, {active} active)",
                    products.len()
                ),
            }
        }
        Err(error) => DoctorCheck {
            name: "data_file",
            status: CheckStatus::Fail,
            details: format!("data file `{}` is not a valid catalog: {error}", path.display()),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skipped",
        };
        lines.push(format!("- {}: {status} ({})", check.name, check.details));
    }
    lines.join("\n")
}
