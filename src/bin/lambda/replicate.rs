use aws_lambda_events::event::s3::S3Event;
use bucket_relay::{
    adapters::inbound::lambda::handle_replicate,
    app::create_app_from_env,
    telemetry::init_lambda_tracing,
};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_lambda_tracing();

    let services = Arc::new(create_app_from_env().await?);

    run(service_fn(move |event: LambdaEvent<S3Event>| {
        let services = services.clone();
        async move {
            tracing::debug!(request_id = %event.context.request_id, "replicate invocation");
            handle_replicate(&services.replication_service, &event.payload).await?;
            Ok::<(), Error>(())
        }
    }))
    .await
}
