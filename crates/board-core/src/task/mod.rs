use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::ErrorInfo;

/// Boxed error returned by task operations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

type Operation<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync>;

/// One unit of remote work: an identifier plus a re-invocable async operation.
///
/// The operation may run several times under a retry policy, so it must tolerate repeated invocation.
pub struct FetchTask<T> {
    id: String,
    op: Operation<T>,
}

impl<T> Clone for FetchTask<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            op: Arc::clone(&self.op),
        }
    }
}

impl<T> fmt::Debug for FetchTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchTask").field("id", &self.id).finish()
    }
}

impl<T> FetchTask<T>
where
    T: Send + 'static,
{
    /// Wrap `op`; every call to it must start a fresh attempt.
    pub fn new<F, Fut, E>(id: impl Into<String>, op: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        let op: Operation<T> = Arc::new(move || {
            let fut = op();
            async move { fut.await.map_err(Into::into) }.boxed()
        });
        Self { id: id.into(), op }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Run the operation once.
    ///
    /// Errors are normalized into [`ErrorInfo`]; a panic inside the operation becomes an `Unknown error`.
    pub async fn invoke(&self) -> Result<T, ErrorInfo> {
        let op = Arc::clone(&self.op);
        let attempt = async move { op().await };

        match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(ErrorInfo::from_error(&*err)),
            Err(payload) => Err(ErrorInfo::from_panic(payload)),
        }
    }
}
