//! Built-in expression catalog.
//!
//! Covers the face-tracking parameter names emitted by current and older
//! tracking-software releases. Every alias appears exactly once across the
//! whole table. Signed combined axes live in [`POLARITY`] instead of the
//! alias table so they can be split into two unsigned parameters.

use crate::emotion::{ColorRange, EmotionDefinition, EmotionHueTable, NEUTRAL};
use crate::parameter::{ParameterDescriptor, PolarityRule};

/// `(canonical name, aliases)`.
pub const PARAMETERS: &[(&str, &[&str])] = &[
    // Gaze
    ("eyeX", &["EyeX"]),
    ("eyeY", &["EyeY"]),
    ("eyeLeftX", &["EyeLeftX"]),
    ("eyeLeftY", &["EyeLeftY"]),
    ("eyeRightX", &["EyeRightX"]),
    ("eyeRightY", &["EyeRightY"]),
    // Lids and openness
    ("eyeBlinkLeft", &["EyeBlinkLeft", "LeftEyeBlink", "LeftEyeLid"]),
    ("eyeBlinkRight", &["EyeBlinkRight", "RightEyeBlink", "RightEyeLid"]),
    ("eyeOpenLeft", &["EyeOpenLeft", "LeftEyeOpen", "LeftEyeOpening"]),
    ("eyeOpenRight", &["EyeOpenRight", "RightEyeOpen", "RightEyeOpening"]),
    ("eyeLidLeft", &["EyeLidLeft", "LeftEyeOpenness", "LeftEyeWiden"]),
    ("eyeLidRight", &["EyeLidRight", "RightEyeOpenness", "RightEyeWiden"]),
    ("eyeLid", &["EyeLid", "EyesOpenness", "EyesWiden"]),
    ("eyesClosedAmount", &["EyesClosedAmount", "EyeClosed", "EyeClosureAmount"]),
    // Squint
    ("eyeSquintLeft", &["EyeSquintLeft", "LeftEyeSquint"]),
    ("eyeSquintRight", &["EyeSquintRight", "RightEyeSquint"]),
    ("eyeSquint", &["EyeSquint", "EyesSquint"]),
    ("EyeSquintLeft1", &[]),
    ("EyeSquintLeft2", &[]),
    ("EyeSquintLeft3", &[]),
    ("EyeSquintLeft4", &[]),
    ("EyeSquintRight1", &[]),
    ("EyeSquintRight2", &[]),
    ("EyeSquintRight3", &[]),
    ("EyeSquintRight4", &[]),
    // Pupils
    ("pupilDilation", &["PupilDilation"]),
    ("pupilDiameterLeft", &["PupilDiameterLeft"]),
    ("pupilDiameterRight", &["PupilDiameterRight"]),
    ("pupilDiameter", &["PupilDiameter"]),
    // Brows
    ("browUp", &["BrowUp"]),
    ("browUpLeft", &["BrowUpLeft", "LeftBrowUp", "BrowRaiseLeft"]),
    ("browUpRight", &["BrowUpRight", "RightBrowUp", "BrowRaiseRight"]),
    ("browDownLeft", &["BrowDownLeft", "LeftBrowDown"]),
    ("browDownRight", &["BrowDownRight", "RightBrowDown"]),
    ("browPinchLeft", &["BrowPinchLeft"]),
    ("browPinchRight", &["BrowPinchRight"]),
    ("browLowererLeft", &["BrowLowererLeft"]),
    ("browLowererRight", &["BrowLowererRight"]),
    ("browInnerUp", &["BrowInnerUp"]),
    ("browInnerUpLeft", &["BrowInnerUpLeft"]),
    ("browInnerUpRight", &["BrowInnerUpRight"]),
    ("browOuterUp", &["BrowOuterUp"]),
    ("browOuterUpLeft", &["BrowOuterUpLeft"]),
    ("browOuterUpRight", &["BrowOuterUpRight"]),
    ("browPinchLeft1", &["BrowPinchLeft1"]),
    ("browPinchRight1", &["BrowPinchRight1"]),
    ("browPinchLeft2", &["BrowPinchLeft2"]),
    ("browPinchRight2", &["BrowPinchRight2"]),
    ("BrowPinchLeft4", &[]),
    ("BrowPinchRight4", &[]),
    ("browInnerUp1", &["BrowInnerUp1"]),
    ("browInnerUp2", &["BrowInnerUp2"]),
    ("BrowInnerUp4", &[]),
    ("BrowExpressionLeft1", &[]),
    ("BrowExpressionRight1", &[]),
    ("BrowExpressionLeft2", &[]),
    ("BrowExpressionRight2", &[]),
    ("BrowExpressionLeft4", &[]),
    ("BrowExpressionRight4", &[]),
    // Mouth
    ("mouthOpen", &["MouthOpen"]),
    ("jawOpen", &["JawOpen", "JawDrop"]),
    (
        "mouthSmile",
        &["MouthSmile", "Smile", "SmileLeft", "SmileRight", "MouthCornerPull"],
    ),
    (
        "mouthFrown",
        &["MouthFrown", "Frown", "FrownLeft", "FrownRight", "MouthCornerDepressor"],
    ),
    ("mouthPucker", &["MouthPucker", "Pucker", "LipPucker"]),
    ("mouthClosed", &["MouthClosed"]),
    ("MouthClosed1", &[]),
    ("MouthClosed2", &[]),
    ("MouthClosed4", &[]),
    ("MouthClosed8", &[]),
    ("MouthDimple1", &[]),
    ("MouthDimple2", &[]),
    ("mouthShrugUpper", &["MouthShrugUpper", "UpperLipRaise"]),
    ("mouthShrugLower", &["MouthShrugLower", "LowerLipDepress"]),
    ("mouthUpperUp1", &["MouthUpperUp1"]),
    ("mouthUpperUp2", &["MouthUpperUp2"]),
    ("MouthUpperUp4", &[]),
    ("MouthUpperUp8", &[]),
    ("mouthLowerDown1", &["MouthLowerDown1"]),
    ("mouthLowerDown2", &["MouthLowerDown2"]),
    ("MouthLowerDown4", &[]),
    ("mouthPress1", &["MouthPress1"]),
    ("mouthPress2", &["MouthPress2"]),
    ("MouthRaiserLower1", &[]),
    ("MouthRaiserLower2", &[]),
    ("MouthRaiserLower4", &[]),
    ("MouthRaiserUpper1", &[]),
    ("MouthRaiserUpper2", &[]),
    ("MouthX1", &[]),
    ("MouthX2", &[]),
    ("MouthX4", &[]),
    ("MouthX8", &[]),
    ("MouthXNegative", &[]),
    // Jaw
    ("JawZ1", &[]),
    ("JawZ2", &[]),
    ("JawZ4", &[]),
    ("JawX1", &[]),
    ("JawX2", &[]),
    ("JawX4", &[]),
    ("JawXNegative", &[]),
    ("JawForward1", &[]),
    ("JawForward2", &[]),
    ("JawForward4", &[]),
    ("JawOpen1", &[]),
    ("JawOpen2", &[]),
    ("JawOpen4", &[]),
    ("JawOpen8", &[]),
    ("JawOpen16", &[]),
    // Lips
    ("LipSuckLower1", &[]),
    ("LipSuckLower2", &[]),
    ("LipSuckLower4", &[]),
    ("LipSuckUpper1", &[]),
    ("LipSuckUpper2", &[]),
    ("LipSuckUpper4", &[]),
    ("LipPucker1", &[]),
    ("LipPucker2", &[]),
    ("LipPucker4", &[]),
    ("LipFunnel1", &[]),
    ("LipFunnel2", &[]),
    ("LipFunnel4", &[]),
    // Tongue
    ("tongueOut", &["TongueOut"]),
    ("TongueOut1", &[]),
    ("TongueOut2", &[]),
    ("TongueOut4", &[]),
    ("TongueOut8", &[]),
    // Cheeks
    ("cheekPuff", &["CheekPuff", "CheekBlow"]),
    ("cheekSquintLeft", &["CheekSquintLeft", "LeftCheekSquint"]),
    ("cheekSquintRight", &["CheekSquintRight", "RightCheekSquint"]),
    ("cheekPuffSuckLeft1", &["CheekPuffSuckLeft1"]),
    ("cheekPuffSuckRight1", &["CheekPuffSuckRight1"]),
    ("CheekPuffSuckLeft2", &[]),
    ("CheekPuffSuckRight2", &[]),
    ("CheekPuffSuckLeft4", &[]),
    ("CheekPuffSuckRight4", &[]),
    ("CheekSquint1", &[]),
    ("CheekSquint2", &[]),
    ("CheekSquint4", &[]),
    // Smile/sad and smile/frown intensity bits
    ("SmileSadLeft1", &[]),
    ("SmileSadRight1", &[]),
    ("SmileSadLeft2", &[]),
    ("SmileSadRight2", &[]),
    ("SmileSadLeft4", &[]),
    ("SmileSadRight4", &[]),
    ("SmileSadLeft8", &[]),
    ("SmileSadRight8", &[]),
    ("SmileSadLeftNegative", &[]),
    ("SmileSadRightNegative", &[]),
    ("SmileFrownLeft1", &[]),
    ("SmileFrownRight1", &[]),
    ("SmileFrownLeft2", &[]),
    ("SmileFrownRight2", &[]),
    ("SmileFrownLeft4", &[]),
    ("SmileFrownRight4", &[]),
    ("SmileFrownLeft8", &[]),
    ("SmileFrownRight8", &[]),
    // Nose
    ("noseSneerLeft", &["NoseSneerLeft", "LeftNoseSneer", "NoseWrinkleLeft"]),
    ("noseSneerRight", &["NoseSneerRight", "RightNoseSneer", "NoseWrinkleRight"]),
    ("noseSneer1", &["NoseSneer1"]),
    ("noseSneer2", &["NoseSneer2"]),
    ("NoseSneer4", &[]),
    ("NoseSneerLeft1", &[]),
    ("NoseSneerRight1", &[]),
    ("NoseSneerLeft2", &[]),
    ("NoseSneerRight2", &[]),
    ("NoseSneerLeft4", &[]),
    ("NoseSneerRight4", &[]),
];

/// `(source, positive target, negative target)`.
pub const POLARITY: &[(&str, &str, &str)] = &[
    ("BrowExpressionLeft", "browUpLeft", "browDownLeft"),
    ("BrowExpressionRight", "browUpRight", "browDownRight"),
    ("SmileFrown", "mouthSmile", "mouthFrown"),
    ("SmileFrownLeft", "mouthSmile", "mouthFrown"),
    ("SmileFrownRight", "mouthSmile", "mouthFrown"),
    ("SmileSad", "mouthSmile", "mouthFrown"),
    ("SmileSadLeft", "mouthSmile", "mouthFrown"),
    ("SmileSadRight", "mouthSmile", "mouthFrown"),
];

/// Declared emotions, in tie-break order.
pub const EMOTIONS: &[(&str, &[(&str, f64)])] = &[
    (
        "happy",
        &[
            ("mouthSmile", 0.6),
            ("cheekSquintLeft", 0.2),
            ("cheekSquintRight", 0.2),
        ],
    ),
    (
        "sad",
        &[
            ("mouthFrown", 0.5),
            ("browInnerUpLeft", 0.25),
            ("browInnerUpRight", 0.25),
        ],
    ),
    (
        "angry",
        &[
            ("browDownLeft", 0.3),
            ("browDownRight", 0.3),
            ("noseSneerLeft", 0.2),
            ("noseSneerRight", 0.2),
        ],
    ),
    (
        "surprised",
        &[("jawOpen", 0.4), ("browUpLeft", 0.3), ("browUpRight", 0.3)],
    ),
];

/// Emotion -> hue.
pub const HUES: &[(&str, f64)] = &[
    ("happy", 0.19),
    ("sad", 0.58),
    ("angry", 0.94),
    ("surprised", 0.28),
    (NEUTRAL, 0.02),
];

/// `(low, high, label)` bands tiling `[0, 1]`.
pub const COLOR_RANGES: &[(f64, f64, &str)] = &[
    (0.00, 0.105, "Red (low)"),
    (0.105, 0.235, "Yellow"),
    (0.235, 0.365, "Green"),
    (0.365, 0.515, "Cyan"),
    (0.515, 0.635, "Ocean Blue"),
    (0.635, 0.72, "Purple"),
    (0.72, 0.80, "Dark Pink"),
    (0.80, 0.895, "Electric Pink"),
    (0.895, 1.00, "Red (high)"),
];

pub fn default_parameters() -> Vec<ParameterDescriptor> {
    PARAMETERS
        .iter()
        .map(|(canonical, aliases)| ParameterDescriptor::new(*canonical, aliases.iter().copied()))
        .collect()
}

pub fn default_polarity() -> Vec<PolarityRule> {
    POLARITY
        .iter()
        .map(|(source, positive, negative)| PolarityRule::new(*source, *positive, *negative))
        .collect()
}

pub fn default_emotions() -> Vec<EmotionDefinition> {
    EMOTIONS
        .iter()
        .map(|(name, weights)| {
            weights
                .iter()
                .fold(EmotionDefinition::new(*name), |def, (param, weight)| {
                    def.with_weight(*param, *weight)
                })
        })
        .collect()
}

pub fn default_hues() -> EmotionHueTable {
    HUES.iter()
        .fold(EmotionHueTable::new(), |table, (emotion, hue)| {
            table.with_hue(*emotion, *hue)
        })
}

pub fn default_color_ranges() -> Vec<ColorRange> {
    COLOR_RANGES
        .iter()
        .map(|(low, high, label)| ColorRange::new(*low, *high, *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::check_color_ranges;
    use crate::parameter::ParameterRegistry;

    #[test]
    fn test_default_catalog_has_unique_aliases() {
        let registry = ParameterRegistry::from_descriptors(default_parameters()).unwrap();
        assert_eq!(registry.len(), PARAMETERS.len());
    }

    #[test]
    fn test_known_tracker_names_resolve() {
        let registry = ParameterRegistry::from_descriptors(default_parameters()).unwrap();
        assert_eq!(registry.lookup("LeftEyeBlink"), Some("eyeBlinkLeft"));
        assert_eq!(registry.lookup("JawDrop"), Some("jawOpen"));
        assert_eq!(registry.lookup("MouthOpen"), Some("mouthOpen"));
        assert_eq!(registry.lookup("TongueOut4"), Some("TongueOut4"));
    }

    #[test]
    fn test_polarity_sources_are_not_aliases() {
        let registry = ParameterRegistry::from_descriptors(default_parameters()).unwrap();
        for rule in default_polarity() {
            assert_eq!(registry.lookup(&rule.source), None, "{}", rule.source);
            assert!(registry.is_canonical(&rule.positive));
            assert!(registry.is_canonical(&rule.negative));
        }
    }

    #[test]
    fn test_every_emotion_has_a_hue() {
        let hues = default_hues();
        for emotion in default_emotions() {
            assert!(hues.contains(&emotion.name), "{}", emotion.name);
        }
        assert!(hues.neutral().is_some());
    }

    #[test]
    fn test_default_color_ranges_tile_unit_interval() {
        check_color_ranges(&default_color_ranges()).unwrap();
    }
}
