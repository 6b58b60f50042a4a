//! # 아바타 로컬 캐시
//!
//! 원격 아바타 이미지를 `<avatar_root>/<user id>` (확장자 없음)에 한 번만 내려받습니다.
//! 계정의 아바타 필드는 원격 URL 그대로 둡니다.
//!
//! 다운로드는 별도 태스크에서 돌고 호출자는 정해진 시간(기본 5초)만 기다립니다.
//! 시간이 지나면 호출자는 `false`를 받고 진행하며, 태스크는 취소되지 않고 버려집니다.
//! 파일은 `.part` 임시 파일에 쓴 뒤 이름을 바꾸므로, 버려진 다운로드가 남긴
//! 반쪽 파일 때문에 캐시가 채워진 것으로 오인되지 않습니다.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::errors::AppError;
use crate::domain::entities::users::LocalUser;
use crate::utils::string_utils::is_remote_reference;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AvatarFetcher {
    client: reqwest::Client,
    avatar_root: PathBuf,
    timeout: Duration,
}

impl AvatarFetcher {
    pub fn new(avatar_root: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            avatar_root: avatar_root.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_path(&self, user_id: i64) -> PathBuf {
        self.avatar_root.join(user_id.to_string())
    }

    /// 계정의 원격 아바타를 로컬 캐시에 내려받습니다.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 이번 호출에서 내려받음
    /// * `Ok(false)` - 원격 URL이 아님, 이미 캐시됨, 또는 네트워크 실패/시간 초과
    /// * `Err(AppError::MalformedInput)` - 아바타 값 자체가 없음
    pub async fn fetch_avatar(&self, user: &LocalUser) -> Result<bool, AppError> {
        let avatar = user
            .profile()
            .map(|profile| profile.avatar.as_str())
            .filter(|avatar| !avatar.is_empty())
            .ok_or_else(|| AppError::MalformedInput(format!("아바타가 없는 계정입니다: {}", user.name())))?;

        if !is_remote_reference(avatar) {
            return Ok(false);
        }

        let destination = self.cache_path(user.id());
        if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
            return Ok(false);
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.avatar_root).await {
            log::warn!("아바타 디렉터리 생성 실패 {}: {}", self.avatar_root.display(), e);
            return Ok(false);
        }

        let download = tokio::spawn(download_to(self.client.clone(), avatar.to_string(), destination.clone()));

        match tokio::time::timeout(self.timeout, download).await {
            Ok(Ok(Ok(size))) => {
                log::info!("🖼️ 아바타 저장: user={} ({} bytes)", user.id(), size);
                Ok(true)
            }
            Ok(Ok(Err(e))) => {
                log::warn!("아바타 다운로드 실패 user={} url={}: {}", user.id(), avatar, e);
                Ok(false)
            }
            Ok(Err(join_error)) => {
                log::warn!("아바타 다운로드 태스크 실패 user={}: {}", user.id(), join_error);
                Ok(false)
            }
            Err(_) => {
                log::warn!("아바타 다운로드 시간 초과 ({:?}) user={} url={}", self.timeout, user.id(), avatar);
                Ok(false)
            }
        }
    }
}

async fn download_to(client: reqwest::Client, url: String, destination: PathBuf) -> Result<usize, AppError> {
    let response = client
        .get(&url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

    let partial = partial_path(&destination);
    tokio::fs::write(&partial, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("아바타 쓰기 실패: {}", e)))?;
    tokio::fs::rename(&partial, &destination)
        .await
        .map_err(|e| AppError::InternalError(format!("아바타 이동 실패: {}", e)))?;

    Ok(bytes.len())
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 테스트 환경의 프록시 설정이 로컬 서버 요청을 가로채지 않도록 합니다.
    fn local_fetcher(root: impl Into<PathBuf>) -> AvatarFetcher {
        AvatarFetcher {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            avatar_root: root.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn user_with_avatar(id: i64, avatar: &str) -> LocalUser {
        let mut user = LocalUser::new_extended(id, format!("user{}", id), String::new(), 0, true);
        user.profile_mut().unwrap().avatar = avatar.to_string();
        user
    }

    /// 요청마다 카운트를 올리고 고정 본문을 돌려주는 HTTP 서버
    async fn serve_avatar(body: &'static [u8]) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buffer = [0u8; 1024];
                let _ = socket.read(&mut buffer).await;
                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(body).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}/avatar.png", address), hits)
    }

    /// 연결은 받지만 응답하지 않는 서버
    async fn serve_nothing() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        format!("http://{}/slow.png", address)
    }

    #[tokio::test]
    async fn test_empty_avatar_is_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = local_fetcher(dir.path());

        let result = fetcher.fetch_avatar(&user_with_avatar(1, "")).await;

        assert!(matches!(result, Err(AppError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_local_reference_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = local_fetcher(dir.path());

        assert!(!fetcher.fetch_avatar(&user_with_avatar(1, "/avatars/1.png")).await.unwrap());
        assert!(!fetcher.cache_path(1).exists());
    }

    #[tokio::test]
    async fn test_downloads_once_into_cache_path() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = local_fetcher(dir.path().join("avatars"));
        let (url, hits) = serve_avatar(b"PNGDATA").await;
        let user = user_with_avatar(42, &url);

        assert!(fetcher.fetch_avatar(&user).await.unwrap());
        assert_eq!(std::fs::read(fetcher.cache_path(42)).unwrap(), b"PNGDATA");
        assert_eq!(user.profile().unwrap().avatar, url);

        assert!(!fetcher.fetch_avatar(&user).await.unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existing_cache_file_means_no_network() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = local_fetcher(dir.path());
        std::fs::write(fetcher.cache_path(7), b"cached").unwrap();
        let (url, hits) = serve_avatar(b"NEW").await;
        let user = user_with_avatar(7, &url);

        assert!(!fetcher.fetch_avatar(&user).await.unwrap());
        assert!(!fetcher.fetch_avatar(&user).await.unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read(fetcher.cache_path(7)).unwrap(), b"cached");
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_false() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = local_fetcher(dir.path()).with_timeout(Duration::from_millis(200));
        let user = user_with_avatar(3, &serve_nothing().await);

        let started = std::time::Instant::now();
        let fetched = fetcher.fetch_avatar(&user).await.unwrap();

        assert!(!fetched);
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(!fetcher.cache_path(3).exists());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_reported_as_false() {
        let dir = tempfile::tempdir().unwrap();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = local_fetcher(dir.path());
        let user = user_with_avatar(5, &format!("http://{}/gone.png", address));

        assert!(!fetcher.fetch_avatar(&user).await.unwrap());
    }
}
