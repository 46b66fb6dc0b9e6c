use aws_lambda_events::event::s3::S3EventRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("event record is missing the bucket name")]
    MissingBucket,

    #[error("event record is missing the object key")]
    MissingKey,

    #[error("object key {key:?} is not valid percent-encoded UTF-8")]
    Decode {
        key: String,
        source: std::string::FromUtf8Error,
    },

    #[error("object key {key:?} has no user prefix")]
    MissingUserPrefix { key: String },
}

/// The parts of an uploaded picture's location, extracted from one S3 event
/// record.
///
/// Object keys arrive with spaces encoded as `+` and everything else
/// percent-encoded. `decoded_key` is the cleaned form used for lookups and
/// display; `raw_key` is the key exactly as delivered, which is what the
/// document id is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureKeyParts {
    pub bucket: String,
    pub raw_key: String,
    pub decoded_key: String,
    pub cognito_id: String,
}

impl PictureKeyParts {
    pub fn from_record(record: &S3EventRecord) -> Result<Self, KeyError> {
        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or(KeyError::MissingBucket)?;
        let raw_key = record.s3.object.key.clone().ok_or(KeyError::MissingKey)?;

        let normalized = raw_key.replace('+', " ");
        let decoded_key = match urlencoding::decode(&normalized) {
            Ok(decoded) => decoded.into_owned(),
            Err(error) => {
                return Err(KeyError::Decode {
                    key: raw_key,
                    source: error,
                })
            }
        };

        // The Cognito identity id is the second path segment:
        // <prefix>/<cognito id>/<file name>
        let Some(cognito_id) = decoded_key.split('/').nth(1) else {
            return Err(KeyError::MissingUserPrefix { key: decoded_key });
        };
        let cognito_id = cognito_id.to_owned();

        Ok(Self {
            bucket,
            raw_key,
            decoded_key,
            cognito_id,
        })
    }
}
