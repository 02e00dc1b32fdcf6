mod analyze_tests;
