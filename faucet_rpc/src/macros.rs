/// Macro for implementing default stuff on a string-like newtype.
#[macro_export]
macro_rules! new_type {
    (
        $(#[$outer:meta])*
        $NewType:ident: $(#[$inner:meta])* $InnerType:ty
    ) => {
        #[allow(missing_docs)]
        #[derive(
            Debug,
            Hash,
            Clone,
            PartialEq,
            Eq,
            ::serde::Serialize,
            ::derive_more::Display,
            ::derive_more::AsRef,
        )]
        #[serde(transparent)]
        $(#[$outer])*
        pub struct $NewType($(#[$inner])* $InnerType);

        const _: () = {
            impl $NewType {
                #[allow(dead_code, missing_docs)]
                pub fn value(&self) -> &$InnerType {
                    &self.0
                }

                #[allow(dead_code, missing_docs)]
                pub fn into_value(self) -> $InnerType {
                    self.0
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $NewType {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    use ::serde::de::Error;

                    String::deserialize(deserializer)?
                        .parse()
                        .map_err(D::Error::custom)
                }
            }
        };
    };
}
