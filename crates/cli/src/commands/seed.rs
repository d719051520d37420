use crate::commands::CommandResult;
use tienda_core::config::{AppConfig, LoadOptions};
use tienda_store::fixtures;

pub fn run(force: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let data_file = config.storage.data_file;
    if data_file.exists() && !force {
        return CommandResult::failure(
            "seed",
            "data_file_exists",
            format!("data file `{}` already exists (use --force to overwrite)", data_file.display()),
            4,
        );
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        if let Some(parent) = data_file.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|error| ("seed_io", error.to_string(), 5u8))?;
            }
        }

        let products = fixtures::sample_products();
        let body = serde_json::to_vec_pretty(&products)
            .map_err(|error| ("seed_serialize", error.to_string(), 5u8))?;
        tokio::fs::write(&data_file, body)
            .await
            .map_err(|error| ("seed_io", error.to_string(), 5u8))?;

        Ok::<usize, (&'static str, String, u8)>(products.len())
    });

    match result {
        Ok(count) => CommandResult::success(
            "seed",
            format!("seeded {count} products into `{}`", data_file.display()),
        ),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}
