/// Declares associated constants for property names in the `DAV:` namespace.
macro_rules! define_dav_property_names {
    ($($const_name:ident => $local_name:expr),* $(,)?) => {
        impl $crate::DavPropertyName {
            $(
                #[doc = concat!("`DAV:", $local_name, "`")]
                pub const $const_name: $crate::DavPropertyName =
                    $crate::DavPropertyName::dav_static($local_name);
            )*

            /// Every predefined `DAV:` property name.
            pub fn dav_properties() -> Vec<$crate::DavPropertyName> {
                vec![$(Self::$const_name),*]
            }
        }
    };
}

pub(crate) use define_dav_property_names;
