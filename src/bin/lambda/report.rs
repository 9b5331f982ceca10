use bucket_relay::{
    adapters::inbound::lambda::{InvocationResponse, handle_report},
    app::create_app_from_env,
    telemetry::init_lambda_tracing,
};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_lambda_tracing();

    // Clients are built once per execution environment and reused across
    // invocations
    let services = Arc::new(create_app_from_env().await?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let services = services.clone();
        async move {
            tracing::debug!(request_id = %event.context.request_id, "report invocation");
            Ok::<InvocationResponse, Error>(handle_report(&services.report_service).await)
        }
    }))
    .await
}
