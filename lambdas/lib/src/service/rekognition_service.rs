use async_trait::async_trait;
use aws_sdk_rekognition::types::{Image, S3Object};
use thiserror::Error;

use super::LabelFetcher;

const MAX_LABELS: i32 = 10;
const MIN_CONFIDENCE: f32 = 75.0;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("detect_labels failed for {bucket}/{key}: {details}")]
    Request {
        bucket: String,
        key: String,
        details: String,
    },
}

#[derive(Debug, Clone)]
pub struct RekognitionService {
    client: aws_sdk_rekognition::Client,
}

impl RekognitionService {
    pub fn new(client: &aws_sdk_rekognition::Client) -> Self {
        Self {
            client: client.to_owned(),
        }
    }
}

#[async_trait]
impl LabelFetcher for RekognitionService {
    async fn get_labels(&self, bucket: &str, key: &str) -> Result<Vec<String>, RecognitionError> {
        let s3_object = S3Object::builder().bucket(bucket).name(key).build();
        let image = Image::builder().s3_object(s3_object).build();

        let response = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(MAX_LABELS)
            .min_confidence(MIN_CONFIDENCE)
            .send()
            .await
            .map_err(|error| RecognitionError::Request {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                details: error.to_string(),
            })?;

        let labels: Vec<String> = response
            .labels()
            .iter()
            .filter_map(|label| label.name().map(str::to_owned))
            .collect();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            count = labels.len(),
            "detect_labels returned"
        );

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::LabelFetcher;
    use aws_sdk_rekognition::operation::detect_labels::DetectLabelsOutput;
    use aws_sdk_rekognition::types::Label;
    use aws_smithy_mocks::{mock, mock_client};

    #[tokio::test]
    async fn labels_are_returned_in_service_order() {
        let detect_labels_rule = mock!(aws_sdk_rekognition::Client::detect_labels).then_output(|| {
            DetectLabelsOutput::builder()
                .labels(Label::builder().name("Dog").confidence(96.5).build())
                .labels(Label::builder().name("Beach").confidence(88.1).build())
                .build()
        });
        let client = mock_client!(aws_sdk_rekognition, [&detect_labels_rule]);

        let service = RekognitionService::new(&client);
        let labels = service
            .get_labels("photos-bucket", "photos/tenant42/vacation.jpg")
            .await
            .unwrap();

        assert_eq!(labels, vec!["Dog".to_owned(), "Beach".to_owned()]);
        assert_eq!(detect_labels_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn unnamed_labels_are_dropped() {
        let detect_labels_rule = mock!(aws_sdk_rekognition::Client::detect_labels).then_output(|| {
            DetectLabelsOutput::builder()
                .labels(Label::builder().confidence(99.0).build())
                .labels(Label::builder().name("Cat").confidence(91.0).build())
                .build()
        });
        let client = mock_client!(aws_sdk_rekognition, [&detect_labels_rule]);

        let service = RekognitionService::new(&client);
        let labels = service.get_labels("b", "a/t1/x.jpg").await.unwrap();

        assert_eq!(labels, vec!["Cat".to_owned()]);
    }
}
