use serde::{Deserialize, Serialize};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SliceSettings{
    /// [model units] Two boundary points closer than this are treated as the
    /// same point when the cross-section loop is assembled.
    pub weld_tolerance: f32,

    /// Fill the cross-section of convex meshes with cap faces.
    /// Non-convex meshes never get caps.
    pub fill_caps: bool,

    /// How texture coordinates are assigned to cap vertices.
    pub cap_uv: CapUv,
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum CapUv {
    /// Every cap vertex gets uv (0,0)
    Zero,
    /// Project cap vertices onto the cutting plane; `scale` is in uv units per world unit
    Planar{ scale: f32 },
}

impl Default for SliceSettings {
    fn default() -> Self {
        Self {
            weld_tolerance: 1e-5,
            fill_caps: true,
            cap_uv: CapUv::Zero,
        }
    }
}

#[test]
fn settings_from_partial_json_test(){
    let settings:SliceSettings = serde_json::from_str(r#"{"cap_uv":{"Planar":{"scale":0.5}}}"#).unwrap();
    assert_eq!(settings.cap_uv,CapUv::Planar{scale:0.5});
    assert_eq!(settings.weld_tolerance,1e-5);
    assert!(settings.fill_caps);
}
