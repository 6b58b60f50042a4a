//! MongoDB 공통 보조 함수
//!
//! - 정수 ID 시퀀스 (`counters` 컬렉션)
//! - 드라이버 에러 → [`AppError`] 변환 (중복 키는 `ConflictError`)

use mongodb::{
    bson::{doc, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Database,
};

use crate::core::errors::{AppError, ErrorContext};

const COUNTERS_COLLECTION: &str = "counters";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반 여부
pub fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// 쓰기 에러를 변환합니다. 중복 키는 `conflict_message`를 담은 `ConflictError`.
pub fn map_write_error(error: MongoError, conflict_message: &str) -> AppError {
    if is_duplicate_key(&error) {
        AppError::ConflictError(conflict_message.to_string())
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

/// `counters` 컬렉션에서 다음 ID를 발급합니다.
///
/// `find_one_and_update` + `$inc` + upsert 한 번으로 처리되므로
/// 동시에 호출되어도 같은 값이 두 번 나오지 않습니다.
pub async fn next_sequence(database: &Database, name: &str) -> Result<i64, AppError> {
    let options = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build();

    let counter = database
        .collection::<Document>(COUNTERS_COLLECTION)
        .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } })
        .with_options(options)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::InternalError(format!("시퀀스 발급 실패: {}", name)))?;

    counter
        .get_i64("seq")
        .with_context(|| format!("시퀀스 형식 오류 ({})", name))
}
