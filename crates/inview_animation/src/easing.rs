//! Easing presets
//!
//! The curated Open Props curve set. Each preset resolves to the CSS timing
//! function the styling layer reads from `--animate-easing`. `spring` is an
//! alias of `spring-3`.

use crate::error::ConfigError;

macro_rules! easings {
    ($($variant:ident => $name:literal, $curve:literal;)*) => {
        /// Named easing curve
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Easing {
            $($variant,)*
        }

        impl Easing {
            /// Every preset, in declaration order
            pub const ALL: &'static [Easing] = &[$(Easing::$variant,)*];

            /// Look up a preset by its attribute spelling
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Easing::$variant),)*
                    _ => None,
                }
            }

            /// Attribute spelling of the preset
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Easing::$variant => $name,)*
                }
            }

            /// CSS timing function for the preset
            pub fn curve(self) -> &'static str {
                match self {
                    $(Easing::$variant => $curve,)*
                }
            }
        }
    };
}

easings! {
    Ease1 => "ease-1", "cubic-bezier(0.25, 0, 0.5, 1)";
    Ease2 => "ease-2", "cubic-bezier(0.25, 0, 0.4, 1)";
    Ease3 => "ease-3", "cubic-bezier(0.25, 0, 0.3, 1)";
    Ease4 => "ease-4", "cubic-bezier(0.25, 0, 0.2, 1)";
    Ease5 => "ease-5", "cubic-bezier(0.25, 0, 0.1, 1)";
    EaseIn1 => "ease-in-1", "cubic-bezier(0.25, 0, 1, 1)";
    EaseIn2 => "ease-in-2", "cubic-bezier(0.5, 0, 1, 1)";
    EaseIn3 => "ease-in-3", "cubic-bezier(0.7, 0, 1, 1)";
    EaseIn4 => "ease-in-4", "cubic-bezier(0.9, 0, 1, 1)";
    EaseIn5 => "ease-in-5", "cubic-bezier(1, 0, 1, 1)";
    EaseOut1 => "ease-out-1", "cubic-bezier(0, 0, 0.75, 1)";
    EaseOut2 => "ease-out-2", "cubic-bezier(0, 0, 0.5, 1)";
    EaseOut3 => "ease-out-3", "cubic-bezier(0, 0, 0.3, 1)";
    EaseOut4 => "ease-out-4", "cubic-bezier(0, 0, 0.1, 1)";
    EaseOut5 => "ease-out-5", "cubic-bezier(0, 0, 0, 1)";
    EaseInOut1 => "ease-in-out-1", "cubic-bezier(0.1, 0, 0.9, 1)";
    EaseInOut2 => "ease-in-out-2", "cubic-bezier(0.3, 0, 0.7, 1)";
    EaseInOut3 => "ease-in-out-3", "cubic-bezier(0.5, 0, 0.5, 1)";
    EaseInOut4 => "ease-in-out-4", "cubic-bezier(0.7, 0, 0.3, 1)";
    EaseInOut5 => "ease-in-out-5", "cubic-bezier(0.9, 0, 0.1, 1)";
    ElasticOut1 => "elastic-out-1", "cubic-bezier(0.5, 0.75, 0.75, 1.25)";
    ElasticOut2 => "elastic-out-2", "cubic-bezier(0.5, 1, 0.75, 1.25)";
    ElasticOut3 => "elastic-out-3", "cubic-bezier(0.5, 1.25, 0.75, 1.25)";
    ElasticOut4 => "elastic-out-4", "cubic-bezier(0.5, 1.5, 0.75, 1.25)";
    ElasticOut5 => "elastic-out-5", "cubic-bezier(0.5, 1.75, 0.75, 1.25)";
    ElasticIn1 => "elastic-in-1", "cubic-bezier(0.5, -0.25, 0.75, 1)";
    ElasticIn2 => "elastic-in-2", "cubic-bezier(0.5, -0.5, 0.75, 1)";
    ElasticIn3 => "elastic-in-3", "cubic-bezier(0.5, -0.75, 0.75, 1)";
    ElasticIn4 => "elastic-in-4", "cubic-bezier(0.5, -1, 0.75, 1)";
    ElasticIn5 => "elastic-in-5", "cubic-bezier(0.5, -1.25, 0.75, 1)";
    Bounce1 => "bounce-1", "linear(0, 0.004, 0.016, 0.035, 0.063, 0.098, 0.141, 0.191, 0.25, 0.316, 0.391 36.8%, 0.563, 0.766, 1 58.8%, 0.946, 0.908 69.1%, 0.895, 0.885, 0.879, 0.878, 0.879, 0.885, 0.895, 0.908 89.7%, 0.946, 1)";
    Bounce2 => "bounce-2", "linear(0, 0.004, 0.016, 0.035, 0.063, 0.098, 0.141 15.1%, 0.25, 0.391, 0.562, 0.765, 1, 0.892 45.2%, 0.849, 0.815, 0.788, 0.769, 0.757, 0.753, 0.757, 0.769, 0.788, 0.815, 0.85, 0.892 75.2%, 1 80.2%, 0.973, 0.954, 0.943, 0.939, 0.943, 0.954, 0.973, 1)";
    Bounce3 => "bounce-3", "linear(0, 0.004, 0.016, 0.035, 0.062, 0.098, 0.141 11.4%, 0.25, 0.39, 0.562, 0.764, 1 30.3%, 0.847 34.8%, 0.787, 0.737, 0.699, 0.672, 0.655, 0.65, 0.656, 0.672, 0.699, 0.738, 0.787, 0.847 61.7%, 1 66.2%, 0.946, 0.908, 0.885 74.2%, 0.879, 0.878, 0.879, 0.885 79.5%, 0.908, 0.946, 1 87.4%, 0.981, 0.968, 0.96, 0.957, 0.96, 0.968, 0.981, 1)";
    Bounce4 => "bounce-4", "linear(0, 0.004, 0.016 3%, 0.062, 0.141, 0.25, 0.391, 0.562 18.2%, 1 24.3%, 0.81, 0.676 32.3%, 0.629, 0.595, 0.575, 0.568, 0.575, 0.595, 0.629, 0.676 48.2%, 0.811, 1 56.2%, 0.918, 0.86, 0.818, 0.794, 0.786, 0.794, 0.818, 0.86, 0.918, 1 77.2%, 0.967 80.2%, 0.946 82.6%, 0.94, 0.946 88.1%, 0.967 90.7%, 1 93.6%, 0.989 96.4%, 1)";
    Bounce5 => "bounce-5", "linear(0, 0.004, 0.016 2.5%, 0.063, 0.141, 0.25 10.1%, 0.562, 1 20.2%, 0.783, 0.641 28.2%, 0.586, 0.547, 0.523, 0.515, 0.523, 0.547, 0.586, 0.641 44%, 0.783, 1 52.1%, 0.874, 0.789 60.2%, 0.756, 0.735, 0.729, 0.735, 0.756, 0.789 70.3%, 0.874, 1 78.3%, 0.95 81.8%, 0.919, 0.911, 0.919, 0.95 89.8%, 1 93.3%, 0.981, 0.977, 0.981, 1)";
    Spring1 => "spring-1", "linear(0, 0.006, 0.025 2.8%, 0.101 6.1%, 0.539 18.9%, 0.721 25.3%, 0.849 31.5%, 0.937 38.1%, 0.968 41.8%, 0.991 45.7%, 1.006 50.1%, 1.015 55%, 1.017 63.9%, 1.001)";
    Spring2 => "spring-2", "linear(0, 0.007, 0.029 2.2%, 0.118 4.7%, 0.625 14.4%, 0.826 19%, 0.902, 0.962, 1.008 26.1%, 1.041 28.7%, 1.064 32.1%, 1.07 36%, 1.061 40.5%, 1.015 53.4%, 0.999 61.6%, 0.995 71.2%, 1)";
    Spring3 => "spring-3", "linear(0, 0.009, 0.035 2.1%, 0.141 4.4%, 0.723 12.9%, 0.938 16.7%, 1.017, 1.077, 1.121, 1.149 24.3%, 1.159, 1.163 27%, 1.154, 1.129 32.8%, 1.051 39.6%, 1.017 43.1%, 0.991, 0.977 51%, 0.974 53.8%, 0.975 57.1%, 0.997 69.8%, 1.003 76.9%, 1)";
    Spring4 => "spring-4", "linear(0, 0.009, 0.037 1.7%, 0.153 3.6%, 0.776 10.3%, 1.001, 1.142 16%, 1.185, 1.209 19%, 1.215 19.9% 20.8%, 1.199, 1.165 25%, 1.056 30.3%, 1.008 33%, 0.973, 0.955 39.2%, 0.953 41.1%, 0.957 43.3%, 0.998 53.3%, 1.009 59.1% 63.7%, 0.998 78.9%, 1)";
    Spring5 => "spring-5", "linear(0, 0.01, 0.04 1.6%, 0.161 3.3%, 0.816 9.4%, 1.046, 1.189 14.4%, 1.231, 1.254 17%, 1.259, 1.257 18.6%, 1.236, 1.194 22.3%, 1.057 27%, 0.999 29.4%, 0.955 32.1%, 0.942, 0.935 34.9%, 0.933, 0.939 38.4%, 1 47.3%, 1.011, 1.017 52.6%, 1.016 56.4%, 1 65.2%, 0.996 70.2%, 1.001 87.2%, 1)";
    Spring => "spring", "linear(0, 0.009, 0.035 2.1%, 0.141 4.4%, 0.723 12.9%, 0.938 16.7%, 1.017, 1.077, 1.121, 1.149 24.3%, 1.159, 1.163 27%, 1.154, 1.129 32.8%, 1.051 39.6%, 1.017 43.1%, 0.991, 0.977 51%, 0.974 53.8%, 0.975 57.1%, 0.997 69.8%, 1.003 76.9%, 1)";
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EaseOut3
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Easing {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Easing::from_name(&name).ok_or(ConfigError::UnknownEasing(name))
    }
}

impl serde::Serialize for Easing {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Easing {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Easing::try_from(name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_count() {
        // 8 families of 5, plus the spring alias
        assert_eq!(Easing::ALL.len(), 41);
    }

    #[test]
    fn test_names_round_trip() {
        for &easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.as_str()), Some(easing));
        }
        assert_eq!(Easing::from_name("magic"), None);
        assert_eq!(Easing::from_name("EASE-1"), None);
    }

    #[test]
    fn test_default_curve() {
        assert_eq!(Easing::default(), Easing::EaseOut3);
        assert_eq!(Easing::default().curve(), "cubic-bezier(0, 0, 0.3, 1)");
    }

    #[test]
    fn test_spring_aliases_spring_3() {
        assert_eq!(Easing::Spring.curve(), Easing::Spring3.curve());
        assert_eq!(Easing::Spring.as_str(), "spring");
    }

    #[test]
    fn test_unknown_name_is_config_error() {
        let err = Easing::try_from("wobble".to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEasing(name) if name == "wobble"));
    }
}
