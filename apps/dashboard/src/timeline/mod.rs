// Career timeline: ordinal → x mapping, click resolution, figure description.

pub mod chronology;
pub mod figure;
pub mod selection;
