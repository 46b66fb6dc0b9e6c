pub mod es_service;
pub mod rekognition_service;

use anyhow::Result;
use async_trait::async_trait;
use aws_config::SdkConfig;

use crate::picture::PictureItem;

use es_service::{ESPictureService, IndexError};
use rekognition_service::{RecognitionError, RekognitionService};

/// Source of image labels for an object sitting in S3.
///
/// An empty label list is a valid answer, distinct from a failed call; the
/// handler skips the index write for unlabeled pictures instead of erroring.
#[async_trait]
pub trait LabelFetcher: Send + Sync {
    async fn get_labels(&self, bucket: &str, key: &str) -> Result<Vec<String>, RecognitionError>;
}

/// Sink for finished picture documents, scoped per Cognito identity so one
/// user's searches never surface another user's pictures.
#[async_trait]
pub trait PictureStore: Send + Sync {
    async fn add(&self, cognito_id: &str, picture: &PictureItem) -> Result<(), IndexError>;
}

#[derive(Debug, Clone)]
pub struct CommonService {
    pub rekognition: RekognitionService,
    pub es: ESPictureService,
}

impl CommonService {
    pub fn new(config: &SdkConfig) -> Result<Self> {
        let rekognition_client = aws_sdk_rekognition::Client::new(config);

        Ok(Self {
            rekognition: RekognitionService::new(&rekognition_client),
            es: ESPictureService::new()?,
        })
    }
}
