use crate::commands::{CommandResult, DataFileSummary};
use custdir_core::config::{AppConfig, LoadOptions};
use custdir_db::{JsonFileCustomerRepository, SeedDataset};

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

    let repository = JsonFileCustomerRepository::new(config.storage.data_file.clone());

    let result = runtime.block_on(async {
        if !force && repository.exists().await {
            return Err((
                "data_file_exists",
                format!(
                    "{} already exists; pass --force to overwrite it",
                    repository.path().display()
                ),
                4u8,
            ));
        }

        if let Some(parent) = repository.path().parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;
        }

        let seeded = SeedDataset::load(&repository)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = SeedDataset::verify(&repository)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        if !verification.all_present {
            let failed_checks = verification
                .checks
                .iter()
                .filter_map(|(check, passed)| (!passed).then_some(*check))
                .collect::<Vec<_>>();
            return Err((
                "seed_verification",
                format!("seed verification failed for checks: {}", failed_checks.join(", ")),
                6u8,
            ));
        }

        Ok(seeded)
    });

    match result {
        Ok(seeded) => CommandResult::success(
            "seed",
            format!(
                "seeded {} customers across {} cities",
                seeded.customers_seeded,
                seeded.cities.len()
            ),
            Some(DataFileSummary::new(
                &config.storage.data_file,
                seeded.customers_seeded,
                seeded.cities.len(),
            )),
        ),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}
