use introspection::runtime::dispatch;
use introspection::{local, EnvSnapshot, Settings};
use lambda_runtime::{service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::new()?;

    if let Some(path) = settings.local_event.as_deref() {
        let envs = EnvSnapshot::capture()?;
        let response = local::invoke_from_file(path, &settings, &envs)?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let func = service_fn(move |event| dispatch(event, settings.clone()));
    lambda_runtime::run(func).await?;
    Ok(())
}
