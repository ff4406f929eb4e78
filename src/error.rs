/// Macro to generate the common From implementations for service errors
///
/// Usage:
/// ```ignore
/// impl_service_error_conversions!(UserServiceError, InternalServerError, ValidationError);
/// ```
#[macro_export]
macro_rules! impl_service_error_conversions {
  ($error_type:ty, $internal_variant:ident) => {
    impl From<sqlx::Error> for $error_type {
      fn from(err: sqlx::Error) -> Self {
        <$error_type>::$internal_variant(format!("Database error: {}", err))
      }
    }
  };

  ($error_type:ty, $internal_variant:ident, $validation_variant:ident) => {
    $crate::impl_service_error_conversions!($error_type, $internal_variant);

    impl From<$crate::payload::PayloadError> for $error_type {
      fn from(err: $crate::payload::PayloadError) -> Self {
        <$error_type>::$validation_variant(err.to_string())
      }
    }
  };
}
