pub mod gazetteer_extractor;
