pub const MAPILLARY_TOKEN: &str = "MAPILLARY_TOKEN";

#[macro_export]
macro_rules! warn_if_env_var_is_missing {
    ($var:expr, $message:expr) => {
        if std::env::var($var).map_or(true, |value| value.trim().is_empty()) {
            tracing::warn!(
                "The `{}` environment variable isn't set. {}",
                $var,
                $message
            );
        }
    };
}
