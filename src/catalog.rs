//! Disease catalog for leaf classification
//!
//! The catalog is the fixed, ordered label space of the classifier: the
//! index of a name in [`CLASS_NAMES`] is its class index, and indices are
//! dense and stable. Healthy conditions are recognized by a `healthy`
//! substring in the label.

/// Total number of classes in the disease catalog
pub const NUM_CLASSES: usize = 34;

/// Substring marking a healthy (non-diseased) condition, matched
/// case-insensitively against the raw label.
pub const HEALTHY_MARKER: &str = "healthy";

/// Disease class names, format: "Crop___Condition" or "Crop___healthy"
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
];

/// Get the class name for a given label index
pub fn class_name(label: usize) -> Option<&'static str> {
    CLASS_NAMES.get(label).copied()
}

/// Get the label index for a given class name
pub fn class_index(name: &str) -> Option<usize> {
    CLASS_NAMES.iter().position(|&n| n == name)
}

/// Check if a class represents a healthy plant (not diseased)
pub fn is_healthy_class(label: usize) -> bool {
    CLASS_NAMES
        .get(label)
        .map(|name| name.to_lowercase().contains(HEALTHY_MARKER))
        .unwrap_or(false)
}

/// Get the crop name from a class (e.g., "Tomato" from "Tomato___Bacterial_spot")
pub fn crop_name(label: usize) -> Option<&'static str> {
    CLASS_NAMES
        .get(label)
        .and_then(|name| name.split("___").next())
}

/// Format a raw catalog label for display: "Apple___Apple_scab" becomes
/// "Apple: Apple scab".
pub fn display_name(label: &str) -> String {
    label.replace("___", ": ").replace('_', " ")
}
