use super::ModelId;

/// An opaque, closable handle to a loaded inference backend.
///
/// A `Model` wraps whatever runtime object a backend produces when it is
/// done loading - a session, a booster, a remote client - together with an
/// identifier. The harness never looks inside [`Model::Instance`]; it only
/// threads the handle from the loader that produced it into the predict
/// functions that consume it.
///
/// # Ownership
///
/// A model is created by exactly one loader and becomes shared, read-only
/// state once loaded: many concurrent predictions may hold the same
/// `Arc<M>`, none may mutate it. Closing the model is the business of
/// whoever owns the loader; the harness does not serialize [`close`] against
/// in-flight predictions, so backends that cannot tolerate a close during a
/// running prediction must document and enforce that themselves.
///
/// # Example
///
/// ```ignore
/// struct SessionModel {
///     id: ModelId,
///     session: tf::Session,
///     closed: AtomicBool,
/// }
///
/// impl Model for SessionModel {
///     type Instance = tf::Session;
///
///     fn id(&self) -> &ModelId {
///         &self.id
///     }
///
///     fn instance(&self) -> &tf::Session {
///         &self.session
///     }
///
///     fn close(&self) {
///         if !self.closed.swap(true, Ordering::SeqCst) {
///             self.session.release();
///         }
///     }
/// }
/// ```
///
/// [`close`]: Model::close
pub trait Model: Send + Sync + 'static {
    /// The backend-specific runtime object.
    type Instance;

    /// Identifier of this model.
    fn id(&self) -> &ModelId;

    /// Returns the underlying backend object.
    fn instance(&self) -> &Self::Instance;

    /// Releases the backend resources held by this model.
    ///
    /// Must be idempotent: the harness makes no guarantee about how many
    /// times the owner calls it, and backend `Drop` impls commonly call it
    /// as a safety net.
    fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::testing::TestModel;

    #[test]
    fn test_close_is_idempotent() {
        let model = TestModel::new("closable", 1.0);
        assert!(!model.is_closed());

        model.close();
        model.close();

        assert!(model.is_closed());
    }
}
