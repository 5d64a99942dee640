/// Generate a router async method that bounds-checks its window, selects
/// providers, and calls a single-provider method.
///
/// The `not_found` label is a noun phrase; the final error reads
/// "{label} for {window} {unit}".
#[macro_export]
macro_rules! greencast_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $arg:ident : u32 ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        param: $param:expr,
        not_found: $not_found:literal,
        unit: $unit:literal,
        call: $call_name:ident
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "greencast::router",
                skip(self),
            )
        )]
        ///
        /// # Errors
        /// Returns `InvalidArg` if the window is out of bounds, otherwise an
        /// error if no eligible provider succeeds or none support the capability.
        pub async fn $name(&self, $arg: u32) -> Result<$ret, greencast_core::GreencastError> {
            let kind: greencast_core::ParamKind = $param;
            if !kind.accepts($arg) {
                return Err(greencast_core::GreencastError::InvalidArg(format!(
                    "{} must be within {}..={}, got {}",
                    kind,
                    kind.min(),
                    kind.max(),
                    $arg
                )));
            }
            self.fetch_single(
                $capability,
                format!(concat!($not_found, " for {} ", $unit), $arg),
                move |c| {
                    c.$accessor()?;
                    Some(async move {
                        match c.$accessor() {
                            Some(p) => p.$call_name($arg).await,
                            None => Err(greencast_core::GreencastError::connector(
                                c.name(),
                                concat!("missing ", stringify!($call_name), " capability during call"),
                            )),
                        }
                    })
                },
            )
            .await
        }
    };
}
