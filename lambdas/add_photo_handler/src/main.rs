use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{
    service_fn,
    tracing::{self},
    Error, LambdaEvent,
};
use lib::env_keys::BUCKET_SUFFIX;
use lib::key::PictureKeyParts;
use lib::picture::PictureItem;
use lib::service::{CommonService, LabelFetcher, PictureStore};

const OK_STATUS: &str = "Ok";

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::v2025_08_07()).await;

    let service = CommonService::new(&config)?;
    let service_function = service_fn(|event| async { add_photo_handler(event, &service).await });
    lambda_runtime::run(service_function).await?;

    Ok(())
}

/// 1. Get the bucket and object key from the event
/// 2. Clean the object key and pull out the Cognito identity id
/// 3. Ask Rekognition for the labels
/// 4. Save the bucket/object and labels into the search index
async fn add_photo_handler(
    event: LambdaEvent<S3Event>,
    service: &CommonService,
) -> Result<String, Error> {
    let bucket_suffix = std::env::var(BUCKET_SUFFIX).unwrap_or_default();
    let status = process_event(
        event.payload,
        &bucket_suffix,
        &service.rekognition,
        &service.es,
    )
    .await?;

    Ok(status)
}

async fn process_event<F, S>(
    event: S3Event,
    bucket_suffix: &str,
    labels: &F,
    pictures: &S,
) -> anyhow::Result<String>
where
    F: LabelFetcher,
    S: PictureStore,
{
    let Some(record) = event.records.first() else {
        anyhow::bail!("event contained no records");
    };

    let key_parts = PictureKeyParts::from_record(record)?;
    tracing::info!(
        bucket = %key_parts.bucket,
        key = %key_parts.decoded_key,
        cognito_id = %key_parts.cognito_id,
        "processing uploaded object"
    );

    let labels = labels
        .get_labels(&key_parts.bucket, &key_parts.decoded_key)
        .await?;

    if labels.is_empty() {
        tracing::info!("no labels returned, not saving to the index");
        // TODO: emit a replay event so unlabeled pictures can be reprocessed
        return Ok(OK_STATUS.to_owned());
    }

    let picture = PictureItem::build(
        &key_parts.raw_key,
        &key_parts.bucket,
        bucket_suffix,
        &key_parts.decoded_key,
        labels,
    );
    tracing::info!(id = %picture.id, path = %picture.path, "saving picture");

    pictures.add(&key_parts.cognito_id, &picture).await?;

    Ok(OK_STATUS.to_owned())
}
